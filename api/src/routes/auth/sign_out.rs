use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::MessageResponse;
use crate::handlers::{cookies, handle_domain_error};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/sign-out
///
/// Deletes the records of the presented tokens and clears the cookies.
/// Signing out without a session still succeeds.
pub async fn sign_out(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let credentials = cookies::credentials_from(&req, &state.cookies);

    match state.accounts.sign_out(&credentials).await {
        Ok(()) => {
            let mut response = HttpResponse::Ok();
            for cookie in cookies::removal_cookies(&state.cookies) {
                response.cookie(cookie);
            }
            response.json(MessageResponse::new("Signed out"))
        }
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}
