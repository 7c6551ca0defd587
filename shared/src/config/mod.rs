//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing, single-use token lifetimes and session cookies
//! - `cache` - Redis configuration for the key-value store
//! - `database` - User store connection configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Issuance ceilings for single-use tokens
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, AuthTokenConfig, JwtConfig, SessionConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitConfig, TokenRateLimits};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
///
/// Built once at startup and handed to every component constructor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// User store configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Key-value store configuration
    pub cache: CacheConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Base URL used to build links sent by email
    pub public_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            public_url: String::from("http://localhost:3000"),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::default().with_max_connections(50),
            auth: AuthConfig {
                jwt: JwtConfig::new("use-env-variable"),
                session: SessionConfig {
                    secure: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::production(),
            logging: LoggingConfig::for_environment(Environment::Production),
            public_url: String::from("https://localhost"),
        }
    }

    /// Preset configuration for an environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.rate_limit = RateLimitConfig::development();
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }
}
