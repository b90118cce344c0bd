//! Course service - Listing, creation and owner-only mutation of courses.
//!
//! Update and delete look the course up first, so a missing id is
//! reported as `NotFound` before ownership is considered.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Course, CourseChanges, CourseDetails, NewCourse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::CourseRepository;

/// Course service trait for dependency injection.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// List all courses with their owners
    async fn list_courses(&self) -> AppResult<Vec<CourseDetails>>;

    /// Get a single course with its owner
    async fn get_course(&self, id: i32) -> AppResult<CourseDetails>;

    /// Create a course owned by `owner_id`
    async fn create_course(&self, owner_id: i32, course: NewCourse) -> AppResult<Course>;

    /// Apply `changes` to a course owned by `user_id`
    async fn update_course(&self, user_id: i32, id: i32, changes: CourseChanges) -> AppResult<()>;

    /// Delete a course owned by `user_id`
    async fn delete_course(&self, user_id: i32, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CourseService.
pub struct CourseManager {
    courses: Arc<dyn CourseRepository>,
}

impl CourseManager {
    /// Create new course service instance
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    /// Load a course and check that `user_id` owns it.
    async fn owned_course(&self, user_id: i32, id: i32) -> AppResult<Course> {
        let course = self.courses.find_by_id(id).await?.ok_or_not_found("Course")?;

        if !course.is_owned_by(user_id) {
            tracing::warn!(course_id = id, user_id, owner_id = course.user_id, "Rejected change by non-owner");
            return Err(AppError::Forbidden);
        }

        Ok(course)
    }
}

#[async_trait]
impl CourseService for CourseManager {
    async fn list_courses(&self) -> AppResult<Vec<CourseDetails>> {
        self.courses.list_with_owner().await
    }

    async fn get_course(&self, id: i32) -> AppResult<CourseDetails> {
        self.courses
            .find_with_owner(id)
            .await?
            .ok_or_not_found("Course")
    }

    async fn create_course(&self, owner_id: i32, course: NewCourse) -> AppResult<Course> {
        let course = self.courses.create(owner_id, course).await?;
        tracing::info!(course_id = course.id, owner_id, "Course created");
        Ok(course)
    }

    async fn update_course(&self, user_id: i32, id: i32, changes: CourseChanges) -> AppResult<()> {
        self.owned_course(user_id, id).await?;
        self.courses.update(id, changes).await?;
        tracing::info!(course_id = id, "Course updated");
        Ok(())
    }

    async fn delete_course(&self, user_id: i32, id: i32) -> AppResult<()> {
        self.owned_course(user_id, id).await?;
        self.courses.delete(id).await?;
        tracing::info!(course_id = id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockCourseRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    const OWNER_ID: i32 = 1;
    const OTHER_ID: i32 = 2;

    fn course(id: i32, user_id: i32) -> Course {
        Course {
            id,
            title: "Build a Basic Bookcase".to_string(),
            description: "High-end furniture projects are great to dream about.".to_string(),
            estimated_time: Some("12 hours".to_string()),
            materials_needed: None,
            user_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn retitle() -> CourseChanges {
        CourseChanges {
            title: Some("Build a Better Bookcase".to_string()),
            ..CourseChanges::default()
        }
    }

    #[tokio::test]
    async fn test_get_missing_course_is_not_found() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_with_owner()
            .with(eq(404))
            .returning(|_| Ok(None));

        let service = CourseManager::new(Arc::new(repo));
        let result = service.get_course(404).await;

        assert!(matches!(result, Err(AppError::NotFound("Course"))));
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id()
            .with(eq(5))
            .returning(|id| Ok(Some(course(id, OWNER_ID))));
        repo.expect_update()
            .with(eq(5), eq(retitle()))
            .times(1)
            .returning(|id, changes| {
                let mut updated = course(id, OWNER_ID);
                updated.title = changes.title.unwrap_or_default();
                Ok(updated)
            });

        let service = CourseManager::new(Arc::new(repo));
        service.update_course(OWNER_ID, 5, retitle()).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(course(id, OWNER_ID))));
        repo.expect_update().never();

        let service = CourseManager::new(Arc::new(repo));
        let result = service.update_course(OTHER_ID, 5, retitle()).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_missing_course_is_not_found() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = CourseManager::new(Arc::new(repo));
        let result = service.update_course(OWNER_ID, 5, retitle()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_forbidden() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(course(id, OWNER_ID))));
        repo.expect_delete().never();

        let service = CourseManager::new(Arc::new(repo));
        let result = service.delete_course(OTHER_ID, 5).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_missing_course_is_not_found() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = CourseManager::new(Arc::new(repo));
        let result = service.delete_course(OWNER_ID, 5).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(course(id, OWNER_ID))));
        repo.expect_delete().with(eq(5)).times(1).returning(|_| Ok(()));

        let service = CourseManager::new(Arc::new(repo));
        service.delete_course(OWNER_ID, 5).await.unwrap();
    }
}
