//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::AppError;

/// Request bodies that list their fields in declaration order.
///
/// Validation messages are reported in this order.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

/// Validated JSON extractor that automatically validates requests.
///
/// A body that fails to deserialize becomes a single-message validation
/// error; a body that deserializes but breaks field rules reports one
/// message per violated rule, in the order of `T::FIELDS`.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use course_api::api::extractors::{FieldOrder, ValidatedJson};
///
/// #[derive(Deserialize, Validate)]
/// struct CreateCourseRequest {
///     #[validate(custom(function = "course_api::api::extractors::not_blank", message = "Please provide a title"))]
///     title: String,
/// }
///
/// impl FieldOrder for CreateCourseRequest {
///     const FIELDS: &'static [&'static str] = &["title"];
/// }
///
/// async fn create_course(ValidatedJson(payload): ValidatedJson<CreateCourseRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FieldOrder,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::Validation(validation_messages(&e, T::FIELDS)))?;

        Ok(ValidatedJson(value))
    }
}

/// Rejects strings that are empty or only whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten validation errors into one message per violated rule.
///
/// Fields follow `order`; any field missing from it sorts last, by name.
pub fn validation_messages(errors: &ValidationErrors, order: &[&str]) -> Vec<String> {
    let position = |field: &str| order.iter().position(|f| *f == field).unwrap_or(order.len());

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| {
        position(&**a)
            .cmp(&position(&**b))
            .then_with(|| a.cmp(b))
    });

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Signup {
        #[validate(custom(function = "not_blank", message = "Please provide a name"))]
        name: String,
        #[validate(email(message = "Please provide a valid email address"))]
        email: String,
        #[validate(custom(function = "not_blank", message = "Please provide a password"))]
        password: String,
    }

    impl FieldOrder for Signup {
        const FIELDS: &'static [&'static str] = &["name", "email", "password"];
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Joe").is_ok());
        assert!(not_blank("  Joe ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
    }

    #[test]
    fn test_messages_follow_declaration_order() {
        let signup = Signup {
            name: " ".to_string(),
            email: "nope".to_string(),
            password: "".to_string(),
        };

        let errors = signup.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors, Signup::FIELDS),
            vec![
                "Please provide a name",
                "Please provide a valid email address",
                "Please provide a password",
            ]
        );
    }

    #[test]
    fn test_unlisted_fields_sort_last_by_name() {
        let signup = Signup {
            name: "".to_string(),
            email: "nope".to_string(),
            password: "".to_string(),
        };

        let errors = signup.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors, &["password"]),
            vec![
                "Please provide a password",
                "Please provide a valid email address",
                "Please provide a name",
            ]
        );
    }
}
