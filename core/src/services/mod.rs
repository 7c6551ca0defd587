//! Business services containing domain logic and use cases.

pub mod account;
pub mod auth_token;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, Mailer, OutboundEmail, PasswordHasher};
pub use auth_token::{AuthTokenService, AuthTokenServiceConfig};
pub use session::{
    JwtSessionService, Session, SessionCredentials, SessionLifecycle, SessionState,
};
pub use token::{JwtIssuer, TokenRateLimiter, TokenStore, TokenVersionAuthority};
