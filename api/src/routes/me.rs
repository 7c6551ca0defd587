use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{ChangePasswordRequest, MessageResponse, UserResponse};
use crate::handlers::{cookies, handle_domain_error, handle_validation_error};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Handler for GET /api/v1/me
pub async fn me(CurrentUser(user): CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(&user))
}

/// Handler for PUT /api/v1/me/password
///
/// Signs the user out everywhere and hands this client a fresh pair.
///
/// ## Errors
/// - 400 Bad Request: New password fails validation
/// - 401 Unauthorized: Current password is wrong
pub async fn change_password(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .accounts
        .change_password(&user, &request.current_password, &request.new_password)
        .await
    {
        Ok(pair) => {
            let mut response = HttpResponse::Ok();
            for cookie in cookies::pair_cookies(&state.cookies, &pair) {
                response.cookie(cookie);
            }
            response.json(MessageResponse::new("Password changed"))
        }
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}
