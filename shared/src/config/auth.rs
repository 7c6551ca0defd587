//! Authentication and session configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT signing and lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Algorithm for JWT signing (HS256, HS384 or HS512)
    pub algorithm: String,

    /// JWT issuer claim
    pub issuer: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Absolute session lifetime in seconds, counted from sign-in.
    /// No refresh can extend a session past this horizon.
    pub session_max_age: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            algorithm: String::from("HS256"),
            issuer: String::from("gatekeeper"),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 604800,  // 7 days
            session_max_age: 2592000,      // 30 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Set the absolute session horizon in seconds
    pub fn with_session_max_age(mut self, seconds: i64) -> Self {
        self.session_max_age = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Lifetimes of the single-use tokens delivered by email
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthTokenConfig {
    /// Account confirmation token lifetime in seconds
    pub account_confirmation_ttl: i64,

    /// Password reset token lifetime in seconds
    pub password_reset_ttl: i64,
}

impl Default for AuthTokenConfig {
    fn default() -> Self {
        Self {
            account_confirmation_ttl: 86400, // 1 day
            password_reset_ttl: 3600,        // 1 hour
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie carrying the access token
    pub access_cookie_name: String,

    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session cookie SameSite attribute
    pub same_site: String,

    /// Session cookie HttpOnly flag
    pub http_only: bool,

    /// Cookie path
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("gk_access"),
            refresh_cookie_name: String::from("gk_refresh"),
            secure: false, // Set to true in production
            same_site: String::from("Strict"),
            http_only: true,
            path: String::from("/"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Single-use token configuration
    pub tokens: AuthTokenConfig,

    /// Session cookie configuration
    pub session: SessionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.session_max_age > config.refresh_token_expiry);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14)
            .with_session_max_age(86400);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert_eq!(config.session_max_age, 86400);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.same_site, "Strict");
        assert!(config.http_only);
        assert!(!config.secure);
        assert_ne!(config.access_cookie_name, config.refresh_cookie_name);
    }
}
