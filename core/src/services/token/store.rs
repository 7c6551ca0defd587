//! Persistence of token records
//!
//! Records live at `token:{value}` with a TTL equal to their remaining
//! lifetime. Each write also adds the value to `user_tokens:{user_id}`, which
//! is how tokens are enumerated per user without scanning the key space.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::Token;
use crate::errors::DomainError;
use crate::repositories::KeyValueStore;

use super::keys::{token_key, user_tokens_key};

/// Token store
pub struct TokenStore<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> TokenStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a token until its expiry
    ///
    /// A token that is already expired is dropped without touching the store.
    pub async fn save(&self, token: &Token) -> Result<(), DomainError> {
        let ttl = token.seconds_to_expiry();
        if ttl <= 0 {
            debug!(kind = %token.kind, user_id = %token.user_id, "Discarding expired token");
            return Ok(());
        }

        let payload = serde_json::to_string(token)
            .map_err(|e| DomainError::internal(format!("token serialization failed: {}", e)))?;

        self.store
            .set_indexed(
                &token_key(&token.value),
                &payload,
                ttl as u64,
                &user_tokens_key(token.user_id),
                &token.value,
            )
            .await
    }

    /// Look up a token by value, `None` if missing or expired
    pub async fn find_token(&self, value: &str) -> Result<Option<Token>, DomainError> {
        let Some(payload) = self.store.get(&token_key(value)).await? else {
            return Ok(None);
        };

        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|e| DomainError::store(format!("corrupt token record: {}", e)))
    }

    /// All live tokens of a user
    ///
    /// Index members whose record has expired are pruned on the way.
    pub async fn find_tokens_by_user_id(&self, user_id: Uuid) -> Result<Vec<Token>, DomainError> {
        let index = user_tokens_key(user_id);
        let mut tokens = Vec::new();

        for value in self.store.set_members(&index).await? {
            match self.find_token(&value).await? {
                Some(token) => tokens.push(token),
                None => {
                    debug!(user_id = %user_id, "Pruning dangling token index entry");
                    self.store.set_remove(&index, &value).await?;
                }
            }
        }

        Ok(tokens)
    }

    /// Delete a token; deleting a missing token is not an error
    pub async fn delete_token(&self, value: &str) -> Result<(), DomainError> {
        let key = token_key(value);
        match self.find_token(value).await? {
            Some(token) => {
                self.store
                    .delete_indexed(&key, &user_tokens_key(token.user_id), value)
                    .await?;
            }
            None => {
                self.store.delete(&key).await?;
            }
        }
        Ok(())
    }
}
