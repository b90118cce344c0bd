//! Authentication service - Resolves Basic-Auth credentials to a user.
//!
//! Every failure collapses into `AppError::Unauthenticated`; the specific
//! reason only reaches the logs.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Name/secret pair taken from an `Authorization: Basic` header
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the user the credentials belong to.
    ///
    /// `None` means the request carried no usable Basic-Auth header.
    async fn authenticate(&self, credentials: Option<Credentials>) -> AppResult<User>;
}

/// Concrete implementation of AuthService over the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    /// Verified against on unknown emails so both rejection paths cost one bcrypt round
    decoy: Option<Password>,
}

impl Authenticator {
    /// Create new auth service instance; `bcrypt_cost` should match the cost of stored hashes
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        let decoy = match Password::new("decoy-password-never-stored", bcrypt_cost) {
            Ok(password) => Some(password),
            Err(e) => {
                tracing::warn!("Could not prepare decoy hash: {}", e);
                None
            }
        };

        Self { users, decoy }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, credentials: Option<Credentials>) -> AppResult<User> {
        let Some(credentials) = credentials else {
            tracing::warn!("Authorization header not found");
            return Err(AppError::Unauthenticated);
        };

        let Some(user) = self.users.find_by_email(&credentials.email).await? else {
            if let Some(decoy) = &self.decoy {
                let _ = decoy.verify(&credentials.password);
            }
            tracing::warn!(email = %credentials.email, "User not found for email");
            return Err(AppError::Unauthenticated);
        };

        let stored_password = Password::from_hash(user.password_hash.clone());
        if !stored_password.verify(&credentials.password) {
            tracing::warn!(email = %user.email_address, "Authentication failed: password mismatch");
            return Err(AppError::Unauthenticated);
        }

        tracing::info!(email = %user.email_address, "Authentication successful");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn stored_user(password: &str) -> User {
        User {
            id: 1,
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: "joe@smith.com".to_string(),
            password_hash: Password::new(password, 4).unwrap().into_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn authenticator(repo: MockUserRepository) -> Authenticator {
        Authenticator::new(Arc::new(repo), 4)
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected_without_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();

        let result = authenticator(repo).authenticate(None).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_unknown_email_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("nobody@example.com"))
            .returning(|_| Ok(None));

        let result = authenticator(repo)
            .authenticate(Some(Credentials::new("nobody@example.com", "whatever")))
            .await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_decoy_hash_is_prepared_at_configured_cost() {
        let service = authenticator(MockUserRepository::new());
        let decoy = service.decoy.expect("decoy hash");

        assert!(decoy.as_str().starts_with("$2b$04$"));
        assert!(!decoy.verify("joepassword"));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let user = stored_user("joepassword");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = authenticator(repo)
            .authenticate(Some(Credentials::new("joe@smith.com", "not-joes-password")))
            .await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_correct_password_returns_user() {
        let user = stored_user("joepassword");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("joe@smith.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let user = authenticator(repo)
            .authenticate(Some(Credentials::new("joe@smith.com", "joepassword")))
            .await
            .unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_unauthenticated() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("connection reset")));

        let result = authenticator(repo)
            .authenticate(Some(Credentials::new("joe@smith.com", "joepassword")))
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
