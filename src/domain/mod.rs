//! Domain layer - Core business entities
//!
//! Plain data holders for users and courses, plus the `Password`
//! value object that owns hashing and verification.

mod course;
mod password;
mod user;

pub use course::{Course, CourseChanges, CourseDetails, CourseResponse, NewCourse, Owner};
pub use password::Password;
pub use user::{NewUser, User, UserResponse};
