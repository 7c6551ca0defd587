use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{EmailRequest, MessageResponse, ResetPasswordRequest};
use crate::handlers::{cookies, handle_domain_error, handle_validation_error};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/password-reset
///
/// Answers 202 whether or not the email is registered.
///
/// ## Errors
/// - 400 Bad Request: Invalid email
/// - 429 Too Many Requests: Reset emails rate limited
pub async fn request_password_reset(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state.accounts.request_password_reset(&request.email).await {
        Ok(()) => HttpResponse::Accepted().json(MessageResponse::new(
            "If the account exists, a password reset email is on its way",
        )),
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}

/// Handler for POST /api/v1/auth/password-reset/{token}
///
/// Sets the new password and revokes every session of the account.
///
/// ## Errors
/// - 400 Bad Request: Password fails validation
/// - 401 Unauthorized: Token unknown, expired, already used or superseded
pub async fn reset_password(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .accounts
        .reset_password(&path.into_inner(), &request.password)
        .await
    {
        Ok(()) => {
            let mut response = HttpResponse::Ok();
            for cookie in cookies::removal_cookies(&state.cookies) {
                response.cookie(cookie);
            }
            response.json(MessageResponse::new("Password updated; please sign in again"))
        }
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}
