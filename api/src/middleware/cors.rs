//! CORS middleware configuration for cross-origin requests.
//!
//! Session cookies only reach the API from browsers when the origin is listed
//! explicitly and credentials are allowed, so there is no wildcard mode.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use gk_shared::config::ServerConfig;

/// Creates a CORS middleware instance for the configured origins
pub fn create_cors(config: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(3600)
        .supports_credentials();

    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
