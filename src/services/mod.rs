//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits so they can
//! be exercised against mocks.

mod auth_service;
pub mod container;
mod course_service;
mod user_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Credentials};
pub use course_service::{CourseManager, CourseService};
pub use user_service::{UserManager, UserService};
