use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{AuthResponse, SignInRequest, UserResponse};
use crate::handlers::{cookies, handle_domain_error, handle_validation_error};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/sign-in
///
/// Starts a new session. The access and refresh tokens are set as cookies;
/// the access token is echoed in the body for Bearer clients.
///
/// ## Errors
/// - 400 Bad Request: Invalid body
/// - 401 Unauthorized: Unknown email or wrong password
pub async fn sign_in(
    state: web::Data<AppState>,
    request: web::Json<SignInRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state.accounts.sign_in(&request.email, &request.password).await {
        Ok((user, pair)) => {
            let mut response = HttpResponse::Ok();
            for cookie in cookies::pair_cookies(&state.cookies, &pair) {
                response.cookie(cookie);
            }
            response.json(AuthResponse {
                user: UserResponse::from(&user),
                access_token: pair.access.token.clone(),
                access_expires_at: pair.access.expires_at(),
            })
        }
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}
