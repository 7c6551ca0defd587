//! Shared configuration and response types for the Gatekeeper server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types, loaded once at startup and passed into constructors
//! - The error response body returned by every API endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, AuthTokenConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, RateLimitConfig, ServerConfig, SessionConfig, TokenRateLimits,
};
pub use errors::{error_codes, ErrorResponse};
