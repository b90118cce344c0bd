//! HTTP request handlers.

pub mod course_handler;
pub mod user_handler;
