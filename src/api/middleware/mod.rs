//! API middleware.

mod auth;

pub use auth::{auth_middleware, credentials_from_headers, CurrentUser};
