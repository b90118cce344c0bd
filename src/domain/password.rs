//! Password value object - Domain layer password handling.
//!
//! Plaintext passwords only ever pass through [`Password::new`] and
//! [`Password::verify`]; everything stored or compared is a bcrypt hash.

use crate::config::PASSWORD_EMPTY_MESSAGE;
use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text with a fresh salt.
    ///
    /// # Errors
    /// Returns a validation error if the password is empty, or an internal
    /// error if `cost` is outside the range bcrypt accepts.
    pub fn new(plain_text: &str, cost: u32) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::validation(PASSWORD_EMPTY_MESSAGE));
        }

        let hash = bcrypt::hash(plain_text, cost)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A stored value that is not a bcrypt hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        bcrypt::verify(plain_text, &self.hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest cost bcrypt accepts, keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain, TEST_COST).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let password = Password::new("joepassword", TEST_COST).unwrap();

        assert_ne!(password.as_str(), "joepassword");
        assert!(password.as_str().starts_with("$2"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain, TEST_COST).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain, TEST_COST).unwrap();
        let pass2 = Password::new(plain, TEST_COST).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = Password::new("", TEST_COST);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let stored = Password::from_hash("plaintext-left-in-the-column".to_string());
        assert!(!stored.verify("plaintext-left-in-the-column"));
    }
}
