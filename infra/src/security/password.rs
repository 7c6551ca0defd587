//! bcrypt implementation of the `PasswordHasher` port
//!
//! Hashing runs on the blocking pool so a high cost factor never stalls the
//! async workers.

use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};

use gk_core::errors::DomainError;
use gk_core::services::PasswordHasher;

use crate::InfrastructureError;

/// bcrypt password hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom cost factor (4..=31); low values are for tests only
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| InfrastructureError::Hashing(e).into())
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();

        let result = tokio::task::spawn_blocking(move || verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))?;

        match result {
            Ok(matches) => Ok(matches),
            // A malformed stored hash can never match
            Err(bcrypt::BcryptError::InvalidHash(_)) | Err(bcrypt::BcryptError::InvalidPrefix(_)) => {
                Ok(false)
            }
            Err(e) => Err(InfrastructureError::Hashing(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = BcryptPasswordHasher::with_cost(4);

        let hashed = hasher.hash("correct horse").await.unwrap();
        assert_ne!(hashed, "correct horse");
        assert!(hasher.verify("correct horse", &hashed).await.unwrap());
        assert!(!hasher.verify("battery staple", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let hasher = BcryptPasswordHasher::with_cost(4);

        let first = hasher.hash("secret").await.unwrap();
        let second = hasher.hash("secret").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_hash_does_not_match() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        assert!(!hasher.verify("secret", "not-a-bcrypt-hash").await.unwrap());
    }
}
