use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{SignUpRequest, UserResponse};
use crate::handlers::{handle_domain_error, handle_validation_error};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/sign-up
///
/// Creates an unverified account and emails a confirmation link.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada",
///     "email": "ada@example.com",
///     "password": "at least 8 characters"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid body
/// - 409 Conflict: Email already registered
/// - 429 Too Many Requests: Confirmation emails rate limited
pub async fn sign_up(
    state: web::Data<AppState>,
    request: web::Json<SignUpRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .accounts
        .sign_up(&request.name, &request.email, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}
