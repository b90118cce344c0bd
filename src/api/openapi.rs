//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{course_handler, user_handler};
use crate::domain::{CourseResponse, Owner, UserResponse};
use crate::types::MessageResponse;

/// OpenAPI documentation for the Course Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Catalog REST API",
        version = "0.1.0",
        description = "Users and the courses they own, protected by HTTP Basic authentication"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::get_current_user,
        user_handler::create_user,
        // Course endpoints
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::create_course,
        course_handler::update_course,
        course_handler::delete_course,
    ),
    components(
        schemas(
            UserResponse,
            Owner,
            CourseResponse,
            MessageResponse,
            user_handler::CreateUserRequest,
            course_handler::CreateCourseRequest,
            course_handler::UpdateCourseRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Account creation and the authenticated user"),
        (name = "Courses", description = "Course catalog; writes are owner-only")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for HTTP Basic authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("Email address and password of a registered user"))
                        .build(),
                ),
            );
        }
    }
}
