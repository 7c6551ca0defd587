//! Authentication route handlers
//!
//! Account creation and confirmation, sign-in and sign-out, and the password
//! reset flow. Single-use tokens arrive as path parameters.

pub mod confirm;
pub mod password_reset;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

use actix_web::{web, Scope};

/// The `/auth` scope
pub fn scope() -> Scope {
    web::scope("/auth")
        .route("/sign-up", web::post().to(sign_up::sign_up))
        .route("/sign-in", web::post().to(sign_in::sign_in))
        .route("/sign-out", web::post().to(sign_out::sign_out))
        .route("/confirm/resend", web::post().to(confirm::resend_confirmation))
        .route("/confirm/{token}", web::get().to(confirm::confirm))
        .route("/password-reset", web::post().to(password_reset::request_password_reset))
        .route("/password-reset/{token}", web::post().to(password_reset::reset_password))
}
