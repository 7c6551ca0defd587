//! Windowed issuance counter for single-use tokens
//!
//! The stored value is the number of tokens issued in the open window. The
//! window starts with the first issuance and is pushed out again on every
//! increment.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::errors::DomainError;
use crate::repositories::KeyValueStore;

use super::keys::rate_limit_key;

/// Token rate limiter
pub struct TokenRateLimiter<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> TokenRateLimiter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Count the pending request would be charged as: issued so far plus one
    ///
    /// Issuance is allowed while this is at most the ceiling. Read-only.
    pub async fn find(&self, user_id: Uuid) -> Result<i64, DomainError> {
        let key = rate_limit_key(user_id);
        let issued = match self.store.get(&key).await? {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                DomainError::store(format!("rate counter '{}' is not an integer", key))
            })?,
            None => 0,
        };
        Ok(issued + 1)
    }

    /// Record one issuance and (re)apply the window TTL
    ///
    /// # Returns
    /// Number of issuances recorded in the window
    pub async fn increment(&self, user_id: Uuid, window_seconds: u64) -> Result<i64, DomainError> {
        let key = rate_limit_key(user_id);
        let count = self.store.incr(&key).await?;
        self.store.expire(&key, window_seconds).await?;
        debug!(user_id = %user_id, count, window_seconds, "Rate counter incremented");
        Ok(count)
    }

    /// Clear the counter
    pub async fn reset(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.store.delete(&rate_limit_key(user_id)).await?;
        Ok(())
    }

    /// Seconds until the window closes, 0 when no window is open
    pub async fn ttl(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let ttl = self.store.ttl(&rate_limit_key(user_id)).await?;
        Ok(ttl.unwrap_or(0).max(0) as u64)
    }
}
