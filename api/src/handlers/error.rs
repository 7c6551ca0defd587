//! Mapping from domain errors to HTTP responses

use actix_web::{http::header, HttpResponse};
use tracing::{error, warn};
use validator::ValidationErrors;

use gk_core::errors::{AuthError, DomainError, TokenError};
use gk_shared::config::SessionConfig;
use gk_shared::errors::{error_codes, ErrorResponse};

use super::cookies;

/// Convert a domain error into its HTTP response
///
/// Unauthorized session outcomes also clear the session cookies. A bad
/// single-use token leaves the caller's session alone.
pub fn handle_domain_error(error: &DomainError, session: &SessionConfig) -> HttpResponse {
    let mut response = error_response(error);

    if matches!(error, DomainError::Auth(e) if e.is_unauthorized()) {
        if let Err(e) = cookies::clear(&mut response, session) {
            error!("Failed to attach removal cookies: {}", e);
        }
    }

    response
}

fn error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::RateLimitExceeded {
            retry_after_seconds,
        }) => HttpResponse::TooManyRequests()
            .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
            .json(
                ErrorResponse::new(
                    error_codes::RATE_LIMIT_EXCEEDED,
                    format!(
                        "Too many requests. Please try again in {}",
                        humanize_wait(*retry_after_seconds)
                    ),
                )
                .add_detail("retry_after_seconds", retry_after_seconds),
            ),
        DomainError::Auth(AuthError::UserAlreadyExists) => HttpResponse::Conflict().json(
            ErrorResponse::new(error_codes::CONFLICT, "An account with this email already exists"),
        ),
        DomainError::Auth(auth_error) => {
            HttpResponse::Unauthorized().json(ErrorResponse::new(error_codes::UNAUTHORIZED, auth_error.to_string()))
        }
        DomainError::Token(TokenError::InvalidToken) => HttpResponse::Unauthorized().json(
            ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid or expired token"),
        ),
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("Resource not found: {}", resource),
        )),
        DomainError::StoreAccess { .. }
        | DomainError::Internal { .. }
        | DomainError::Token(TokenError::TokenGenerationFailed) => {
            error!("Request failed: {}", error);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response listing the offending fields
pub fn handle_validation_error(errors: &ValidationErrors) -> HttpResponse {
    warn!("Request validation failed: {}", errors);

    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort();
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed")
            .add_detail("fields", fields),
    )
}

/// "45 seconds", "1 minute", "3 hours"; partial units round up
pub fn humanize_wait(seconds: u64) -> String {
    let (amount, unit) = match seconds {
        0..=59 => (seconds.max(1), "second"),
        60..=3599 => (seconds.div_ceil(60), "minute"),
        _ => (seconds.div_ceil(3600), "hour"),
    };

    if amount == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", amount, unit)
    }
}
