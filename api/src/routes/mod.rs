//! Route registration

pub mod admin;
pub mod auth;
pub mod health;
pub mod me;
pub mod session;

use actix_web::web;

use gk_core::domain::Role;

use crate::middleware::SessionGate;

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api/v1")
            .service(auth::scope())
            .service(
                web::resource("/session")
                    .wrap(SessionGate::open())
                    .route(web::get().to(session::current_session)),
            )
            .service(
                web::resource("/me")
                    .wrap(SessionGate::roles(&[Role::Unverified, Role::User, Role::Admin]))
                    .route(web::get().to(me::me)),
            )
            .service(
                web::resource("/me/password")
                    .wrap(SessionGate::roles(&[Role::User, Role::Admin]))
                    .route(web::put().to(me::change_password)),
            )
            .service(
                web::scope("/admin")
                    .wrap(SessionGate::roles(&[Role::Admin]))
                    .route("/users/{id}", web::get().to(admin::get_user)),
            ),
    );
}
