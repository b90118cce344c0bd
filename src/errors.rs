//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ACCESS_DENIED_MESSAGE;

/// Coarse classification of an [`AppError`], one per response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Uniqueness,
    Unauthenticated,
    Forbidden,
    NotFound,
    Internal,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,

    // Resource errors
    #[error("{0} Not Found")]
    NotFound(&'static str),

    // Input errors, one message per violated rule
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Uniqueness violated: {}", .0.join(", "))]
    Uniqueness(Vec<String>),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Body for 400 responses
#[derive(Debug, Serialize)]
struct ErrorListResponse<'a> {
    errors: &'a [String],
}

/// Body for responses that carry a single message
#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

impl AppError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unauthenticated => ErrorKind::Unauthenticated,
            AppError::Forbidden => ErrorKind::Forbidden,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Uniqueness(_) => ErrorKind::Uniqueness,
            AppError::Database(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Uniqueness => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Field-level messages carried by validation and uniqueness errors.
    pub fn messages(&self) -> &[String] {
        match self {
            AppError::Validation(messages) | AppError::Uniqueness(messages) => messages,
            _ => &[],
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Unauthenticated => ACCESS_DENIED_MESSAGE.to_string(),

            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self.kind() {
            ErrorKind::Validation | ErrorKind::Uniqueness => (
                status,
                Json(ErrorListResponse {
                    errors: self.messages(),
                }),
            )
                .into_response(),
            ErrorKind::Forbidden => status.into_response(),
            _ => (
                status,
                Json(MessageBody {
                    message: self.user_message(),
                }),
            )
                .into_response(),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T> {
        self.ok_or(AppError::NotFound(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(vec![msg.into()])
    }

    pub fn uniqueness(msg: impl Into<String>) -> Self {
        AppError::Uniqueness(vec![msg.into()])
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_kinds_map_to_statuses() {
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::uniqueness("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("Course").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(sea_orm::DbErr::Custom("boom".into())).kind(),
            ErrorKind::Internal
        );
    }

    #[tokio::test]
    async fn test_validation_lists_every_message() {
        let err = AppError::Validation(vec![
            "Please provide a title".to_string(),
            "Please provide a description".to_string(),
        ]);

        let json = body_json(err.into_response()).await;
        assert_eq!(
            json["errors"],
            serde_json::json!(["Please provide a title", "Please provide a description"])
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_is_generic() {
        let json = body_json(AppError::Unauthenticated.into_response()).await;
        assert_eq!(json["message"], "Access Denied");
    }

    #[tokio::test]
    async fn test_forbidden_has_empty_body() {
        let response = AppError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let json = body_json(AppError::internal("secret detail").into_response()).await;
        assert_eq!(json["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_not_found_names_entity() {
        let json = body_json(AppError::NotFound("Course").into_response()).await;
        assert_eq!(json["message"], "Course Not Found");
    }
}
