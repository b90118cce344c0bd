//! Application state - Dependency injection container.
//!
//! Provides handlers and middleware with the services they call.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, CourseService, Services, UserService};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Course service
    pub course_service: Arc<dyn CourseService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::new(services, database)
    }

    /// Create new application state with manually assembled services.
    pub fn new(services: Services, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            course_service: services.courses(),
            database,
        }
    }
}
