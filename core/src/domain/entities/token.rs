//! Token entities shared by the single-use token and session subsystems.
//!
//! Every credential the server hands out is described by a [`TokenKind`]:
//! opaque single-use tokens delivered by email (`Auth`) or signed session
//! tokens carried in cookies (`Jwt`). Both are persisted as [`Token`] records
//! so that they can be revoked before their natural expiry.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Role;

/// Coarse token family, used to namespace version counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Single-use tokens delivered by email
    Auth,
    /// Signed session tokens
    Jwt,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Auth => "auth",
            TokenCategory::Jwt => "jwt",
        }
    }
}

/// Single-use token purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthTokenType {
    /// Confirms ownership of the email address given at sign-up
    AccountConfirmation,
    /// Authorizes a password change without the current password
    PasswordReset,
}

impl AuthTokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthTokenType::AccountConfirmation => "account_confirmation",
            AuthTokenType::PasswordReset => "password_reset",
        }
    }
}

/// Session token purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JwtTokenType {
    /// Short-lived token presented on every request
    Access,
    /// Longer-lived token used to mint a new pair
    Refresh,
}

impl JwtTokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JwtTokenType::Access => "access",
            JwtTokenType::Refresh => "refresh",
        }
    }
}

/// Closed set of every token the server issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "type", rename_all = "lowercase")]
pub enum TokenKind {
    Auth(AuthTokenType),
    Jwt(JwtTokenType),
}

impl TokenKind {
    /// Category half of the kind
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Auth(_) => TokenCategory::Auth,
            TokenKind::Jwt(_) => TokenCategory::Jwt,
        }
    }

    /// Type half of the kind, as used in store keys
    pub fn type_str(&self) -> &'static str {
        match self {
            TokenKind::Auth(t) => t.as_str(),
            TokenKind::Jwt(t) => t.as_str(),
        }
    }
}

impl From<AuthTokenType> for TokenKind {
    fn from(token_type: AuthTokenType) -> Self {
        TokenKind::Auth(token_type)
    }
}

impl From<JwtTokenType> for TokenKind {
    fn from(token_type: JwtTokenType) -> Self {
        TokenKind::Jwt(token_type)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category().as_str(), self.type_str())
    }
}

/// Persisted token record
///
/// For `Auth` tokens `value` is the random string sent to the user; for `Jwt`
/// tokens it is the `jti` claim of the signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Lookup value
    pub value: String,

    /// Owning user
    pub user_id: Uuid,

    /// What the token authorizes
    pub kind: TokenKind,

    /// Version counter snapshot taken at issuance
    pub version: i64,

    /// Absolute expiry instant
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn new(
        value: impl Into<String>,
        user_id: Uuid,
        kind: TokenKind,
        version: i64,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            value: value.into(),
            user_id,
            kind,
            version,
            expires_at,
        }
    }

    /// Whole seconds until expiry, negative once expired
    pub fn seconds_to_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Lifetime anchor of one session
///
/// Created at sign-in and inherited along the refresh chain, so that no
/// sequence of refreshes can push a token past `max_expiry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAnchor {
    /// Instant new tokens are stamped with
    pub issued_at: DateTime<Utc>,

    /// Hard horizon of the session
    pub max_expiry: DateTime<Utc>,
}

impl SessionAnchor {
    /// Anchor for a brand new session
    pub fn start(now: DateTime<Utc>, session_max_age: Duration) -> Self {
        Self {
            issued_at: now,
            max_expiry: now + session_max_age,
        }
    }

    /// Anchor for a refresh step, keeping the inherited horizon
    pub fn inherit(now: DateTime<Utc>, max_expiry: DateTime<Utc>) -> Self {
        Self {
            issued_at: now,
            max_expiry,
        }
    }

    /// Expiry for a token of the given lifetime, capped by the horizon
    pub fn expiry_for(&self, lifetime: Duration) -> DateTime<Utc> {
        (self.issued_at + lifetime).min(self.max_expiry)
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// JWT ID, also the key of the persisted token record
    pub jti: String,

    /// Subject (user ID)
    pub sub: Uuid,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Version counter snapshot
    pub version: i64,

    /// Role of the user at issuance
    pub role: Role,

    /// Access or refresh
    pub typ: JwtTokenType,

    /// Session max expiry timestamp
    pub sxp: i64,
}

impl Claims {
    /// Expiry as an instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Session horizon as an instant
    pub fn session_max_expiry(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.sxp, 0).unwrap_or_default()
    }

    pub fn kind(&self) -> TokenKind {
        TokenKind::Jwt(self.typ)
    }
}

/// A signed JWT together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    pub token: String,
    pub claims: Claims,
}

impl SignedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

/// Access and refresh tokens minted together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: SignedToken,
    pub refresh: SignedToken,
}
