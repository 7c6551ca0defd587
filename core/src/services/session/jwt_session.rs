//! JWT session service
//!
//! Access and refresh tokens are always minted as a pair. Every signed token
//! is backed by a store record keyed by its `jti`, so a token stays usable only
//! while both its signature and its record are valid.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::token::{
    Claims, JwtTokenType, SessionAnchor, SignedToken, Token, TokenCategory, TokenPair,
};
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::KeyValueStore;
use crate::services::token::{JwtIssuer, TokenStore, TokenVersionAuthority};

/// Issues, decodes and revokes session tokens
pub struct JwtSessionService<S: KeyValueStore + ?Sized> {
    issuer: Arc<JwtIssuer>,
    versions: TokenVersionAuthority<S>,
    tokens: TokenStore<S>,
}

impl<S: KeyValueStore + ?Sized> JwtSessionService<S> {
    pub fn new(store: Arc<S>, issuer: Arc<JwtIssuer>) -> Self {
        Self {
            issuer,
            versions: TokenVersionAuthority::new(store.clone()),
            tokens: TokenStore::new(store),
        }
    }

    /// Issuer used to sign tokens
    pub fn issuer(&self) -> &JwtIssuer {
        &self.issuer
    }

    /// Mints a new access + refresh pair
    ///
    /// Both version counters are bumped first, which revokes every pair
    /// previously issued to the user.
    ///
    /// # Arguments
    ///
    /// * `user` - Subject of the pair
    /// * `anchor` - Session anchor to inherit; `None` starts a new session
    pub async fn create_tokens(
        &self,
        user: &User,
        anchor: Option<SessionAnchor>,
    ) -> Result<TokenPair, DomainError> {
        let anchor = anchor.unwrap_or_else(|| self.issuer.start_session());

        let access = self.mint(user, JwtTokenType::Access, &anchor).await?;
        let refresh = self.mint(user, JwtTokenType::Refresh, &anchor).await?;

        self.persist(&access).await?;
        self.persist(&refresh).await?;

        info!(user_id = %user.id, session_max_expiry = %anchor.max_expiry, "Session tokens issued");
        Ok(TokenPair { access, refresh })
    }

    async fn mint(
        &self,
        user: &User,
        token_type: JwtTokenType,
        anchor: &SessionAnchor,
    ) -> Result<SignedToken, DomainError> {
        let version = self.versions.increment(user.id, token_type.into()).await?;
        self.issuer.generate_token(user, token_type, version, anchor)
    }

    async fn persist(&self, signed: &SignedToken) -> Result<(), DomainError> {
        let claims = &signed.claims;
        let record = Token::new(
            claims.jti.clone(),
            claims.sub,
            claims.kind(),
            claims.version,
            claims.expires_at(),
        );
        self.tokens.save(&record).await
    }

    /// Decodes a presented token
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Claims))` - Signature, expiry and issuer are valid and the
    ///   store still holds a matching record
    /// * `Ok(None)` - Anything else
    /// * `Err(DomainError)` - The store could not be read
    pub async fn decode_token(&self, raw: &str) -> Result<Option<Claims>, DomainError> {
        let Some(claims) = self.issuer.validate_token(raw) else {
            return Ok(None);
        };

        match self.tokens.find_token(&claims.jti).await? {
            Some(record) if record.kind == claims.kind() && record.user_id == claims.sub => {
                Ok(Some(claims))
            }
            Some(_) => {
                debug!(jti = %claims.jti, "Token record does not match claims");
                Ok(None)
            }
            None => {
                debug!(jti = %claims.jti, "No live record for token");
                Ok(None)
            }
        }
    }

    /// Current version counter for a session token type
    pub async fn get_current_version(
        &self,
        user_id: Uuid,
        token_type: JwtTokenType,
    ) -> Result<i64, DomainError> {
        self.versions.find(user_id, token_type.into()).await
    }

    /// Deletes the records behind presented tokens
    ///
    /// Tokens that do not validate are skipped.
    ///
    /// # Returns
    ///
    /// Number of tokens revoked
    pub async fn revoke_tokens(&self, raw_tokens: &[&str]) -> Result<usize, DomainError> {
        let mut revoked = 0;
        for raw in raw_tokens {
            if let Some(claims) = self.issuer.validate_token(raw) {
                self.tokens.delete_token(&claims.jti).await?;
                revoked += 1;
            }
        }
        debug!(revoked, "Revoked presented tokens");
        Ok(revoked)
    }

    /// Deletes one token record by `jti`
    pub async fn delete_record(&self, jti: &str) -> Result<(), DomainError> {
        self.tokens.delete_token(jti).await
    }

    /// Revokes every session of a user
    ///
    /// Bumping both counters is what revokes; the records are removed too.
    pub async fn revoke_all_sessions(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.versions.increment(user_id, JwtTokenType::Access.into()).await?;
        self.versions.increment(user_id, JwtTokenType::Refresh.into()).await?;

        for token in self.tokens.find_tokens_by_user_id(user_id).await? {
            if token.kind.category() == TokenCategory::Jwt {
                self.tokens.delete_token(&token.value).await?;
            }
        }

        info!(user_id = %user_id, "All sessions revoked");
        Ok(())
    }
}
