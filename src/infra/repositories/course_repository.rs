//! Course repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{Course, CourseChanges, CourseDetails, NewCourse, User};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List every course with its owner, ordered by id
    async fn list_with_owner(&self) -> AppResult<Vec<CourseDetails>>;

    /// Find one course with its owner
    async fn find_with_owner(&self, id: i32) -> AppResult<Option<CourseDetails>>;

    /// Find course by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>>;

    /// Insert a new course owned by `user_id`
    async fn create(&self, user_id: i32, course: NewCourse) -> AppResult<Course>;

    /// Overwrite the fields present in `changes`
    async fn update(&self, id: i32, changes: CourseChanges) -> AppResult<Course>;

    /// Delete course by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CourseRepository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn list_with_owner(&self) -> AppResult<Vec<CourseDetails>> {
        let rows = CourseEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter().map(into_details).collect()
    }

    async fn find_with_owner(&self, id: i32) -> AppResult<Option<CourseDetails>> {
        let row = CourseEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        row.map(into_details).transpose()
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Course::from))
    }

    async fn create(&self, user_id: i32, course: NewCourse) -> AppResult<Course> {
        let now = Utc::now();
        let active_model = ActiveModel {
            title: Set(course.title),
            description: Set(course.description),
            estimated_time: Set(course.estimated_time),
            materials_needed: Set(course.materials_needed),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Course::from(model))
    }

    async fn update(&self, id: i32, changes: CourseChanges) -> AppResult<Course> {
        let model = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Course")?;

        let mut active: ActiveModel = model.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(estimated_time) = changes.estimated_time {
            active.estimated_time = Set(estimated_time);
        }
        if let Some(materials_needed) = changes.materials_needed {
            active.materials_needed = Set(materials_needed);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Course::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CourseEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Course"));
        }

        Ok(())
    }
}

fn into_details((course, owner): (course::Model, Option<user::Model>)) -> AppResult<CourseDetails> {
    // The user_id foreign key is NOT NULL, so a missing owner means a broken row
    let owner = owner
        .ok_or_else(|| AppError::internal(format!("Course {} has no owner", course.id)))?;

    Ok(CourseDetails {
        course: Course::from(course),
        owner: User::from(owner).into(),
    })
}
