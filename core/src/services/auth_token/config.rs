//! Auth token service configuration

use gk_shared::config::{AppConfig, TokenRateLimits};

use crate::domain::entities::token::AuthTokenType;

/// Configuration for the auth token service
#[derive(Debug, Clone)]
pub struct AuthTokenServiceConfig {
    /// Whether issuance is rate limited at all
    pub rate_limit_enabled: bool,
    /// Issuance ceiling and window
    pub limits: TokenRateLimits,
    /// Account confirmation token lifetime in seconds
    pub account_confirmation_ttl: i64,
    /// Password reset token lifetime in seconds
    pub password_reset_ttl: i64,
}

impl Default for AuthTokenServiceConfig {
    fn default() -> Self {
        Self {
            rate_limit_enabled: true,
            limits: TokenRateLimits::default(),
            account_confirmation_ttl: 24 * 60 * 60,
            password_reset_ttl: 60 * 60,
        }
    }
}

impl From<&AppConfig> for AuthTokenServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            rate_limit_enabled: config.rate_limit.enabled,
            limits: config.rate_limit.auth_tokens,
            account_confirmation_ttl: config.auth.tokens.account_confirmation_ttl,
            password_reset_ttl: config.auth.tokens.password_reset_ttl,
        }
    }
}

impl AuthTokenServiceConfig {
    /// Lifetime of a token type in seconds
    pub fn ttl_for(&self, token_type: AuthTokenType) -> i64 {
        match token_type {
            AuthTokenType::AccountConfirmation => self.account_confirmation_ttl,
            AuthTokenType::PasswordReset => self.password_reset_ttl,
        }
    }

    /// Builder: override the rate limit ceiling
    pub fn with_max_per_window(mut self, max: i64) -> Self {
        self.limits.max_per_window = max;
        self
    }
}
