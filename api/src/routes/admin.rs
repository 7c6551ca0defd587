use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::UserResponse;
use crate::handlers::handle_domain_error;
use crate::state::AppState;

/// Handler for GET /api/v1/admin/users/{id}
pub async fn get_user(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.accounts.find_user(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error, &state.cookies),
    }
}
