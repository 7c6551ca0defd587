//! Domain layer containing business entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    AuthTokenType, Claims, JwtTokenType, Role, SessionAnchor, SignedToken, Token, TokenCategory,
    TokenKind, TokenPair, User,
};
