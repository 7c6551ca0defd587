//! Per-(user, category, type) version counters
//!
//! A token is only honoured while the version it was issued with equals the
//! counter's current value, so one increment revokes every earlier token of
//! that kind for the user.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::errors::DomainError;
use crate::repositories::KeyValueStore;

use super::keys::version_key;

/// Token version authority
pub struct TokenVersionAuthority<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> TokenVersionAuthority<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current version, initialized to 1 on first read
    pub async fn find(&self, user_id: Uuid, kind: TokenKind) -> Result<i64, DomainError> {
        let key = version_key(user_id, kind);
        if self.store.set_nx(&key, "1").await? {
            debug!("Initialized version counter '{}'", key);
        }

        match self.store.get(&key).await? {
            Some(raw) => raw.parse().map_err(|_| {
                DomainError::store(format!("version counter '{}' is not an integer", key))
            }),
            // Deleted between the two calls; same as a fresh counter
            None => Ok(1),
        }
    }

    /// Bump the version, invalidating every token issued with an older one
    pub async fn increment(&self, user_id: Uuid, kind: TokenKind) -> Result<i64, DomainError> {
        let version = self.store.incr(&version_key(user_id, kind)).await?;
        info!(user_id = %user_id, kind = %kind, version, "Token version bumped");
        Ok(version)
    }
}
