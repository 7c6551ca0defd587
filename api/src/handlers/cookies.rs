//! Session cookies
//!
//! The access and refresh JWTs travel in `HttpOnly` cookies whose lifetime
//! matches the token they carry. An `Authorization: Bearer` header is accepted
//! in place of the access cookie.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use gk_core::domain::{SignedToken, TokenPair};
use gk_core::services::SessionCredentials;
use gk_shared::config::SessionConfig;

/// Read the credentials a request presents
pub fn credentials_from(req: &HttpRequest, config: &SessionConfig) -> SessionCredentials {
    let access = bearer_token(req).or_else(|| cookie_value(req, &config.access_cookie_name));
    let refresh = cookie_value(req, &config.refresh_cookie_name);
    SessionCredentials::new(access, refresh)
}

fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Extracts Bearer token from Authorization header
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn same_site(config: &SessionConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

fn build(config: &SessionConfig, name: &str, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build(name.to_string(), value)
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(config))
        .max_age(max_age)
        .finish()
}

fn token_cookie(config: &SessionConfig, name: &str, token: &SignedToken) -> Cookie<'static> {
    let remaining = (token.expires_at() - Utc::now()).num_seconds().max(0);
    build(config, name, token.token.clone(), Duration::seconds(remaining))
}

/// Cookies carrying a freshly issued pair
pub fn pair_cookies(config: &SessionConfig, pair: &TokenPair) -> [Cookie<'static>; 2] {
    [
        token_cookie(config, &config.access_cookie_name, &pair.access),
        token_cookie(config, &config.refresh_cookie_name, &pair.refresh),
    ]
}

/// Cookies that make the browser drop both session cookies
pub fn removal_cookies(config: &SessionConfig) -> [Cookie<'static>; 2] {
    [&config.access_cookie_name, &config.refresh_cookie_name].map(|name| {
        let mut cookie = build(config, name, String::new(), Duration::ZERO);
        cookie.make_removal();
        cookie
    })
}

/// Attach the pair's cookies to a response
pub fn set_pair<B>(
    response: &mut HttpResponse<B>,
    config: &SessionConfig,
    pair: &TokenPair,
) -> Result<(), actix_web::Error> {
    for cookie in pair_cookies(config, pair) {
        response.add_cookie(&cookie)?;
    }
    Ok(())
}

/// Clear both session cookies on a response
pub fn clear<B>(response: &mut HttpResponse<B>, config: &SessionConfig) -> Result<(), actix_web::Error> {
    for cookie in removal_cookies(config) {
        response.add_cookie(&cookie)?;
    }
    Ok(())
}
