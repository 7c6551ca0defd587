//! Unit tests for domain errors

use super::{AuthError, DomainError, TokenError};

#[test]
fn test_auth_error_bridges_into_domain_error() {
    let err: DomainError = AuthError::RateLimitExceeded {
        retry_after_seconds: 90,
    }
    .into();

    assert!(matches!(
        err,
        DomainError::Auth(AuthError::RateLimitExceeded {
            retry_after_seconds: 90
        })
    ));
    assert!(err.to_string().contains("90 seconds"));
}

#[test]
fn test_token_error_is_transparent() {
    let err: DomainError = TokenError::InvalidToken.into();
    assert_eq!(err.to_string(), "Invalid token");
}

#[test]
fn test_unauthorized_reasons() {
    assert!(AuthError::StaleCredential.is_unauthorized());
    assert!(AuthError::UserNoLongerExists.is_unauthorized());
    assert!(AuthError::RoleNotPermitted.is_unauthorized());
    assert!(AuthError::InvalidCredentials.is_unauthorized());
    assert!(!AuthError::UserAlreadyExists.is_unauthorized());
    assert!(!AuthError::RateLimitExceeded {
        retry_after_seconds: 1
    }
    .is_unauthorized());
}

#[test]
fn test_store_access_message() {
    let err = DomainError::store("connection refused");
    assert_eq!(err.to_string(), "Store access failed: connection refused");
}
