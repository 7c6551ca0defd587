use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{EmailRequest, MessageResponse, UserResponse};
use crate::handlers::{handle_domain_error, handle_validation_error};
use crate::state::AppState;

/// Handler for GET /api/v1/auth/confirm/{token}
///
/// ## Errors
/// - 401 Unauthorized: Token unknown, expired, already used or superseded
pub async fn confirm(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.accounts.confirm_account(&path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}

/// Handler for POST /api/v1/auth/confirm/resend
///
/// ## Errors
/// - 400 Bad Request: Invalid email or account already confirmed
/// - 429 Too Many Requests: Confirmation emails rate limited
pub async fn resend_confirmation(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state.accounts.resend_confirmation(&request.email).await {
        Ok(()) => HttpResponse::Accepted().json(MessageResponse::new(
            "If the account exists, a confirmation email is on its way",
        )),
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}
