//! Auth token service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{AuthTokenType, Token, TokenKind};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::KeyValueStore;
use crate::services::token::{TokenRateLimiter, TokenStore, TokenVersionAuthority};

use super::config::AuthTokenServiceConfig;

/// Length of generated token values
pub const AUTH_TOKEN_LENGTH: usize = 48;

/// Issues and verifies single-use tokens
///
/// At most one token per (user, type) is live: issuing a new one deletes the
/// previous token and bumps the version so a leftover copy can never be used.
pub struct AuthTokenService<S: KeyValueStore + ?Sized> {
    tokens: TokenStore<S>,
    versions: TokenVersionAuthority<S>,
    limiter: TokenRateLimiter<S>,
    config: AuthTokenServiceConfig,
}

impl<S: KeyValueStore + ?Sized> AuthTokenService<S> {
    pub fn new(store: Arc<S>, config: AuthTokenServiceConfig) -> Self {
        Self {
            tokens: TokenStore::new(store.clone()),
            versions: TokenVersionAuthority::new(store.clone()),
            limiter: TokenRateLimiter::new(store),
            config,
        }
    }

    /// Issues a new token of the given type
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - The persisted token; `value` is what gets emailed
    /// * `Err(AuthError::RateLimitExceeded)` - Ceiling reached for the window
    pub async fn create_token(
        &self,
        user_id: Uuid,
        token_type: AuthTokenType,
    ) -> Result<Token, DomainError> {
        let kind = TokenKind::Auth(token_type);

        if self.config.rate_limit_enabled {
            let count = self.limiter.find(user_id).await?;
            if count > self.config.limits.max_per_window {
                let retry_after_seconds = self.limiter.ttl(user_id).await?;
                warn!(
                    user_id = %user_id,
                    kind = %kind,
                    retry_after_seconds,
                    "Auth token issuance rate limited"
                );
                return Err(AuthError::RateLimitExceeded {
                    retry_after_seconds,
                }
                .into());
            }
        }

        // Single active token per type
        for existing in self.tokens.find_tokens_by_user_id(user_id).await? {
            if existing.kind == kind {
                self.tokens.delete_token(&existing.value).await?;
            }
        }

        self.versions.find(user_id, kind).await?;
        let version = self.versions.increment(user_id, kind).await?;

        let token = Token::new(
            generate_value(),
            user_id,
            kind,
            version,
            Utc::now() + Duration::seconds(self.config.ttl_for(token_type)),
        );
        self.tokens.save(&token).await?;

        if self.config.rate_limit_enabled {
            self.limiter
                .increment(user_id, self.config.limits.window_seconds)
                .await?;
        }

        info!(user_id = %user_id, kind = %kind, version, "Auth token issued");
        Ok(token)
    }

    /// Looks up a token by value
    pub async fn find_token(&self, value: &str) -> Result<Option<Token>, DomainError> {
        self.tokens.find_token(value).await
    }

    /// Deletes a token by value
    pub async fn delete_token(&self, value: &str) -> Result<(), DomainError> {
        self.tokens.delete_token(value).await
    }

    /// Verifies and spends a token
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - The token, now deleted
    /// * `Err(TokenError::InvalidToken)` - Missing, expired, wrong type or outdated
    pub async fn consume(
        &self,
        value: &str,
        token_type: AuthTokenType,
    ) -> Result<Token, DomainError> {
        let kind = TokenKind::Auth(token_type);

        let Some(token) = self.tokens.find_token(value).await? else {
            return Err(TokenError::InvalidToken.into());
        };

        if token.kind != kind {
            warn!(user_id = %token.user_id, expected = %kind, actual = %token.kind, "Auth token type mismatch");
            return Err(TokenError::InvalidToken.into());
        }

        let current = self.versions.find(token.user_id, kind).await?;
        if token.version != current {
            warn!(user_id = %token.user_id, kind = %kind, "Outdated auth token presented");
            self.tokens.delete_token(value).await?;
            return Err(TokenError::InvalidToken.into());
        }

        self.tokens.delete_token(value).await?;
        info!(user_id = %token.user_id, kind = %kind, "Auth token consumed");
        Ok(token)
    }
}

fn generate_value() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
