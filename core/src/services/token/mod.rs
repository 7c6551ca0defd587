//! Token building blocks shared by the single-use token and session services
//!
//! - Version counters used for O(1) bulk revocation
//! - Per-user issuance rate limiting for single-use tokens
//! - Persistence of token records with a per-user index
//! - JWT signing and validation with a bounded session lifetime

mod issuer;
mod keys;
mod rate_limiter;
mod store;
mod version;

#[cfg(test)]
mod tests;

pub use issuer::JwtIssuer;
pub use rate_limiter::TokenRateLimiter;
pub use store::TokenStore;
pub use version::TokenVersionAuthority;
