//! User handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{not_blank, FieldOrder, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NewUser, UserResponse};
use crate::errors::AppResult;
use crate::types::Created;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        required(message = "Please provide a value for 'First Name'"),
        custom(function = "not_blank", message = "Please provide a first name")
    )]
    #[schema(example = "Joe")]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Please provide a value for 'Last Name'"),
        custom(function = "not_blank", message = "Please provide a last name")
    )]
    #[schema(example = "Smith")]
    pub last_name: Option<String>,
    #[validate(
        required(message = "Please provide a value for 'Email'"),
        email(message = "Please provide a valid email address")
    )]
    #[schema(example = "joe@smith.com")]
    pub email_address: Option<String>,
    #[validate(
        required(message = "Please provide a value for 'Password'"),
        custom(function = "not_blank", message = "Please provide a password")
    )]
    #[schema(example = "joepassword")]
    pub password: Option<String>,
}

impl FieldOrder for CreateUserRequest {
    const FIELDS: &'static [&'static str] = &["first_name", "last_name", "email_address", "password"];
}

impl From<CreateUserRequest> for NewUser {
    // Only reached after validation, so every field is present
    fn from(request: CreateUserRequest) -> Self {
        Self {
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            email_address: request.email_address.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        }
    }
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Access Denied")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
) -> Json<UserResponse> {
    Json(UserResponse {
        first_name: current_user.first_name,
        last_name: current_user.last_name,
        email_address: current_user.email_address,
    })
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", headers(("Location" = String))),
        (status = 400, description = "Validation error or email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created> {
    state.user_service.create_user(payload.into()).await?;
    Ok(Created::at("/"))
}
