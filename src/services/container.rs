//! Service Container - Centralized service wiring.
//!
//! Builds every service over one database connection so the API layer
//! receives a fully assembled set in a single value.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CourseManager, CourseService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{CourseRepository, CourseStore, UserRepository, UserStore};

/// Concrete set of application services
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    course_service: Arc<dyn CourseService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        course_service: Arc<dyn CourseService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            course_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.clone()));
        let courses: Arc<dyn CourseRepository> = Arc::new(CourseStore::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), config.bcrypt_cost)),
            user_service: Arc::new(UserManager::new(users, config.bcrypt_cost)),
            course_service: Arc::new(CourseManager::new(courses)),
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get course service
    pub fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }
}
