//! Ports to the password hashing primitive and outbound email delivery

use async_trait::async_trait;

use crate::errors::DomainError;

/// Opaque password hashing primitive
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plain-text password against a stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// An email ready to be handed to the delivery service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound email delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), DomainError>;
}
