use actix_web::HttpResponse;

use crate::dto::{SessionResponse, UserResponse};
use crate::middleware::SessionContext;

/// Handler for GET /api/v1/session
///
/// Open to everyone; reports the caller's effective role and, when signed in,
/// the user. A refresh-only caller gets a reissued pair as cookies.
pub async fn current_session(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        role: session.role,
        user: session.user.as_ref().map(UserResponse::from),
    })
}
