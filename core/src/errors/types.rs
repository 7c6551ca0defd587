//! Error types for authentication and token operations

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Presented credential carries an outdated version
    #[error("Unauthorized: stale credential")]
    StaleCredential,

    #[error("Unauthorized: user no longer exists")]
    UserNoLongerExists,

    #[error("Unauthorized: role not permitted")]
    RoleNotPermitted,

    #[error("Unauthorized: invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,
}

impl AuthError {
    /// Whether the error maps to an unauthorized outcome
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::StaleCredential
                | AuthError::UserNoLongerExists
                | AuthError::RoleNotPermitted
                | AuthError::InvalidCredentials
        )
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Missing, expired, consumed, mistyped or outdated token
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
