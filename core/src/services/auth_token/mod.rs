//! Single-use email tokens: account confirmation and password reset

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthTokenServiceConfig;
pub use service::{AuthTokenService, AUTH_TOKEN_LENGTH};
