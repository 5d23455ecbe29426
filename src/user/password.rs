use async_trait::async_trait;
use tracing::{error, warn};

use crate::shared::AppError;

/// Fixed bcrypt work factor for stored credentials
pub const PASSWORD_HASH_COST: u32 = 10;

/// One-way salted password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, AppError>;
    /// A stored hash that cannot be parsed verifies as `false`
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

/// bcrypt-backed hasher; the work runs on the blocking thread pool
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self::with_cost(PASSWORD_HASH_COST)
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| {
                error!(error = %e, "Password hashing task failed");
                AppError::Internal
            })?
            .map_err(|e| {
                error!(error = %e, "Password hashing failed");
                AppError::Internal
            })
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                error!(error = %e, "Password verification task failed");
                AppError::Internal
            })?;

        match outcome {
            Ok(valid) => Ok(valid),
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(4)
    }

    #[tokio::test]
    async fn test_hash_is_not_plaintext_and_verifies() {
        let hasher = hasher();

        for password in ["pass1", "correct horse battery", "abcdefghijklmnopqrstuvwxyz1234"] {
            let hash = hasher.hash(password).await.unwrap();
            assert_ne!(hash, password);
            assert!(hasher.verify(password, &hash).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_wrong_password_does_not_verify() {
        let hasher = hasher();
        let hash = hasher.hash("pass1").await.unwrap();

        assert!(!hasher.verify("wrong", &hash).await.unwrap());
        assert!(!hasher.verify("Pass1", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = hasher();

        let first = hasher.hash("pass1").await.unwrap();
        let second = hasher.hash("pass1").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_default_cost_is_encoded_in_hash() {
        let hash = BcryptPasswordHasher::new().hash("pass1").await.unwrap();
        assert!(hash.starts_with("$2b$10$"));
    }

    #[tokio::test]
    async fn test_malformed_hash_verifies_false() {
        assert!(!hasher().verify("pass1", "not-a-bcrypt-hash").await.unwrap());
    }
}
