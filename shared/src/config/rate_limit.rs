//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,

    /// Limits on single-use token issuance (confirmation and reset emails)
    pub auth_tokens: TokenRateLimits,
}

/// Per-user issuance ceiling for confirmation and password reset tokens
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenRateLimits {
    /// Max tokens issued to one user within a window
    pub max_per_window: i64,

    /// Window length in seconds, restarted on every issuance
    pub window_seconds: u64,
}

impl Default for TokenRateLimits {
    fn default() -> Self {
        Self {
            max_per_window: 3,
            window_seconds: 3600, // 1 hour
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_tokens: TokenRateLimits::default(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            auth_tokens: TokenRateLimits {
                max_per_window: 10,
                window_seconds: 600,
            },
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }
}
