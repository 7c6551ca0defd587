//! Domain entities representing core business objects.

pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{
    AuthTokenType, Claims, JwtTokenType, SessionAnchor, SignedToken, Token, TokenCategory,
    TokenKind, TokenPair,
};
pub use user::{Role, User};
