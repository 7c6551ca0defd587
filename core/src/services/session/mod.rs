//! Session tokens and per-request session evaluation

mod jwt_session;
mod lifecycle;

#[cfg(test)]
mod tests;

pub use jwt_session::JwtSessionService;
pub use lifecycle::{Session, SessionCredentials, SessionLifecycle, SessionState};
