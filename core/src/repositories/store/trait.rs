//! Key-value store trait backing token records, version counters and rate counters.
//!
//! The contract mirrors a small subset of Redis semantics: string values with an
//! optional per-key TTL, integer counters, and sets. Every method is a single
//! atomic step on the store side; `set_indexed` and `delete_indexed` update a
//! record and its secondary index together.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Key-value store used by the token and session services
///
/// Failures to reach the backend are reported as `DomainError::StoreAccess`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get a string value, `None` when missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Set a value without expiry, clearing any previous TTL
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Set a value only if the key does not exist
    ///
    /// # Returns
    /// * `Ok(true)` - The value was written
    /// * `Ok(false)` - The key already existed and was left untouched
    async fn set_nx(&self, key: &str, value: &str) -> Result<bool, DomainError>;

    /// Set a value that expires after `seconds`
    async fn set_with_expiry(&self, key: &str, value: &str, seconds: u64)
        -> Result<(), DomainError>;

    /// Atomically increment an integer value; a missing key counts from 0
    ///
    /// An existing TTL is preserved.
    async fn incr(&self, key: &str) -> Result<i64, DomainError>;

    /// (Re)apply a TTL to an existing key
    ///
    /// # Returns
    /// * `Ok(true)` - TTL applied
    /// * `Ok(false)` - Key does not exist
    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, DomainError>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;

    /// Delete a key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Remaining TTL in seconds, `None` if the key is missing or has no expiry
    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError>;

    /// Members of a set, empty when the key is missing
    async fn set_members(&self, key: &str) -> Result<Vec<String>, DomainError>;

    /// Remove one member from a set
    async fn set_remove(&self, key: &str, member: &str) -> Result<(), DomainError>;

    /// Write `key` with a TTL and add `member` to the set at `index_key` in one step
    ///
    /// The index never expires before the record just written.
    async fn set_indexed(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
        index_key: &str,
        member: &str,
    ) -> Result<(), DomainError>;

    /// Delete `key` and remove `member` from the set at `index_key` in one step
    async fn delete_indexed(
        &self,
        key: &str,
        index_key: &str,
        member: &str,
    ) -> Result<bool, DomainError>;
}
