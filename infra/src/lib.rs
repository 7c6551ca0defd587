//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Gatekeeper server,
//! following Clean Architecture principles. It provides concrete implementations
//! of the ports declared in `gk_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis-backed `KeyValueStore` for token records, versions and rate counters
//! - **Database**: MySQL `UserRepository` using SQLx
//! - **Security**: bcrypt `PasswordHasher`
//! - **Mail**: `Mailer` that hands emails to the log pipeline
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis store support (default)

use gk_core::errors::DomainError;

/// Cache module - Redis client and store operations
pub mod cache;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Adapter health probes
pub mod health;

/// Outbound email delivery
pub mod mail;

/// Password hashing
pub mod security;

pub use cache::RedisClient;
#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlUserRepository};
pub use health::HealthProbe;
pub use mail::LogMailer;
pub use security::BcryptPasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(_) | InfrastructureError::Cache(_) => {
                DomainError::StoreAccess {
                    message: err.to_string(),
                }
            }
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
