//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::EMAIL_IN_USE_MESSAGE;
use crate::domain::{NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user, storing only the hash of their password
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        if self
            .users
            .find_by_email(&new_user.email_address)
            .await?
            .is_some()
        {
            return Err(AppError::uniqueness(EMAIL_IN_USE_MESSAGE));
        }

        let NewUser {
            first_name,
            last_name,
            email_address,
            password,
        } = new_user;

        let password_hash = Password::new(&password, self.bcrypt_cost)?.into_string();
        let user = self
            .users
            .create(first_name, last_name, email_address, password_hash)
            .await?;

        tracing::info!(user_id = user.id, email = %user.email_address, "User created");
        Ok(user)
    }
}
