//! Course handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{not_blank, FieldOrder, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CourseChanges, CourseResponse, NewCourse};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Course creation request; any `userId` in the body is ignored
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(
        required(message = "Please provide a value for 'Title'"),
        custom(function = "not_blank", message = "Please provide a title")
    )]
    #[schema(example = "Build a Basic Bookcase")]
    pub title: Option<String>,
    #[validate(
        required(message = "Please provide a value for 'Description'"),
        custom(function = "not_blank", message = "Please provide a description")
    )]
    #[schema(example = "High-end furniture projects are great to dream about.")]
    pub description: Option<String>,
    #[schema(example = "12 hours")]
    pub estimated_time: Option<String>,
    #[schema(example = "* 1/2 x 3/4 inch parting strip")]
    pub materials_needed: Option<String>,
}

impl FieldOrder for CreateCourseRequest {
    const FIELDS: &'static [&'static str] = &["title", "description", "estimated_time", "materials_needed"];
}

impl From<CreateCourseRequest> for NewCourse {
    // Only reached after validation, so title and description are present
    fn from(request: CreateCourseRequest) -> Self {
        Self {
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            estimated_time: request.estimated_time,
            materials_needed: request.materials_needed,
        }
    }
}

/// Course update request; omitted fields are left unchanged, `null` clears the optional ones
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(custom(function = "not_blank", message = "Please provide a title"))]
    #[schema(example = "Build a Better Bookcase")]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank", message = "Please provide a description"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, example = "14 hours")]
    pub estimated_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub materials_needed: Option<Option<String>>,
}

impl FieldOrder for UpdateCourseRequest {
    const FIELDS: &'static [&'static str] = &["title", "description", "estimated_time", "materials_needed"];
}

/// Keeps an explicit `null` (`Some(None)`) apart from an omitted key (`None`).
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateCourseRequest> for CourseChanges {
    fn from(request: UpdateCourseRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            estimated_time: request.estimated_time,
            materials_needed: request.materials_needed,
        }
    }
}

/// Course ids that are not integers can never match a row.
fn parse_course_id(raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| AppError::NotFound("Course"))
}

/// List all courses with their owners
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "All courses", body = Vec<CourseResponse>)
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<CourseResponse>>> {
    let courses = state.course_service.list_courses().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CourseResponse>> {
    let id = parse_course_id(&id)?;
    let course = state.course_service.get_course(id).await?;
    Ok(Json(CourseResponse::from(course)))
}

/// Create a course owned by the authenticated user
#[utoipa::path(
    post,
    path = "/courses",
    tag = "Courses",
    security(("basic_auth" = [])),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", headers(("Location" = String))),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Access Denied")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<Created> {
    let course = state
        .course_service
        .create_course(current_user.id, payload.into())
        .await?;

    Ok(Created::at(format!("/courses/{}", course.id)))
}

/// Update a course owned by the authenticated user
#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "Courses",
    security(("basic_auth" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Access Denied"),
        (status = 403, description = "Caller does not own the course"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCourseRequest>,
) -> AppResult<NoContent> {
    let id = parse_course_id(&id)?;
    state
        .course_service
        .update_course(current_user.id, id, payload.into())
        .await?;

    Ok(NoContent)
}

/// Delete a course owned by the authenticated user
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "Courses",
    security(("basic_auth" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Access Denied"),
        (status = 403, description = "Caller does not own the course"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    let id = parse_course_id(&id)?;
    state
        .course_service
        .delete_course(current_user.id, id)
        .await?;

    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::extractors::validation_messages;

    #[test]
    fn test_parse_course_id() {
        assert_eq!(parse_course_id("12").unwrap(), 12);
        assert!(matches!(parse_course_id("abc"), Err(AppError::NotFound("Course"))));
    }

    #[test]
    fn test_update_request_allows_partial_body() {
        let payload: UpdateCourseRequest =
            serde_json::from_value(serde_json::json!({ "estimatedTime": "3 hours" })).unwrap();
        assert!(payload.validate().is_ok());

        let changes = CourseChanges::from(payload);
        assert_eq!(changes.estimated_time, Some(Some("3 hours".to_string())));
        assert!(changes.title.is_none());
        assert!(changes.materials_needed.is_none());
    }

    #[test]
    fn test_update_request_null_clears_optional_field() {
        let payload: UpdateCourseRequest =
            serde_json::from_value(serde_json::json!({ "materialsNeeded": null })).unwrap();
        assert!(payload.validate().is_ok());

        let changes = CourseChanges::from(payload);
        assert_eq!(changes.materials_needed, Some(None));
        assert!(changes.estimated_time.is_none());
    }

    #[test]
    fn test_update_request_rejects_whitespace_title() {
        let payload: UpdateCourseRequest =
            serde_json::from_value(serde_json::json!({ "title": "   ", "description": "\n" })).unwrap();
        let errors = payload.validate().unwrap_err();

        assert_eq!(
            validation_messages(&errors, UpdateCourseRequest::FIELDS),
            vec!["Please provide a title", "Please provide a description"]
        );
    }

    #[test]
    fn test_create_request_rejects_whitespace_fields() {
        let payload: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "title": "   ",
            "description": "  "
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();

        assert_eq!(
            validation_messages(&errors, CreateCourseRequest::FIELDS),
            vec!["Please provide a title", "Please provide a description"]
        );
    }

    #[test]
    fn test_update_request_rejects_empty_title() {
        let payload: UpdateCourseRequest =
            serde_json::from_value(serde_json::json!({ "title": "" })).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_request_ignores_user_id() {
        let payload: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "title": "Learn How to Program",
            "description": "In this course, you'll learn how to write code.",
            "userId": 99
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        let course = NewCourse::from(payload);
        assert_eq!(course.title, "Learn How to Program");
        assert!(course.estimated_time.is_none());
    }
}
