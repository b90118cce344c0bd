//! Course domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::User;

/// Course domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    /// Id of the owning user
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Whether `user_id` is the owner of this course
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// Publicly visible details of a course owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[schema(example = "Joe")]
    pub first_name: String,
    #[schema(example = "Smith")]
    pub last_name: String,
    #[schema(example = "joe@smith.com")]
    pub email_address: String,
}

impl From<User> for Owner {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
        }
    }
}

/// A course together with its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    pub course: Course,
    pub owner: Owner,
}

/// Validated input for creating a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Fields to overwrite on an existing course; `None` leaves a field as is
///
/// The optional columns take `Some(None)` to be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
}

/// Course response with the owner embedded
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Build a Basic Bookcase")]
    pub title: String,
    #[schema(example = "High-end furniture projects are great to dream about.")]
    pub description: String,
    #[schema(example = "12 hours")]
    pub estimated_time: Option<String>,
    #[schema(example = "* 1/2 x 3/4 inch parting strip")]
    pub materials_needed: Option<String>,
    #[schema(example = 1)]
    pub user_id: i32,
    pub user: Owner,
}

impl From<CourseDetails> for CourseResponse {
    fn from(details: CourseDetails) -> Self {
        let CourseDetails { course, owner } = details;
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: course.user_id,
            user: owner,
        }
    }
}
