//! In-process key-value store for tests and single-process development.
//!
//! Expired keys are dropped lazily when touched. The map is guarded by a single
//! async `RwLock`, so every trait method is atomic with respect to the others.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::DomainError;

use super::r#trait::KeyValueStore;

#[derive(Debug, Clone)]
enum Value {
    Str(String),
    Set(HashSet<String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn string(value: &str, expires_at: Option<Instant>) -> Self {
        Self {
            value: Value::Str(value.to_string()),
            expires_at,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory `KeyValueStore`
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Look up a key, dropping it first if it has expired
fn live<'a>(
    entries: &'a mut HashMap<String, Entry>,
    key: &str,
    now: Instant,
) -> Option<&'a mut Entry> {
    if entries.get(key).is_some_and(|e| e.is_expired(now)) {
        debug!("Dropping expired key '{}'", key);
        entries.remove(key);
    }
    entries.get_mut(key)
}

fn wrong_type(key: &str) -> DomainError {
    DomainError::store(format!(
        "WRONGTYPE operation against key '{}' holding the wrong kind of value",
        key
    ))
}

fn expiry(now: Instant, seconds: u64) -> Instant {
    now + Duration::from_secs(seconds)
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut entries = self.entries.write().await;
        match live(&mut entries, key, Instant::now()) {
            Some(Entry {
                value: Value::Str(v),
                ..
            }) => Ok(Some(v.clone())),
            Some(_) => Err(wrong_type(key)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Entry::string(value, None));
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        if live(&mut entries, key, Instant::now()).is_some() {
            return Ok(false);
        }
        entries.insert(key.to_string(), Entry::string(value, None));
        Ok(true)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> Result<(), DomainError> {
        if seconds == 0 {
            return Err(DomainError::store("invalid expire time in 'set_with_expiry'"));
        }
        let mut entries = self.entries.write().await;
        let at = expiry(Instant::now(), seconds);
        entries.insert(key.to_string(), Entry::string(value, Some(at)));
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, DomainError> {
        let mut entries = self.entries.write().await;
        match live(&mut entries, key, Instant::now()) {
            Some(Entry {
                value: Value::Str(v),
                ..
            }) => {
                let current: i64 = v.parse().map_err(|_| {
                    DomainError::store(format!("value at '{}' is not an integer", key))
                })?;
                let next = current + 1;
                *v = next.to_string();
                Ok(next)
            }
            Some(_) => Err(wrong_type(key)),
            None => {
                entries.insert(key.to_string(), Entry::string("1", None));
                Ok(1)
            }
        }
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        if live(&mut entries, key, now).is_none() {
            return Ok(false);
        }
        if seconds == 0 {
            entries.remove(key);
        } else if let Some(entry) = entries.get_mut(key) {
            entry.expires_at = Some(expiry(now, seconds));
        }
        Ok(true)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(live(&mut entries, key, Instant::now()).is_some())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let existed = live(&mut entries, key, Instant::now()).is_some();
        entries.remove(key);
        Ok(existed)
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        Ok(live(&mut entries, key, now)
            .and_then(|e| e.expires_at)
            .map(|at| {
                // Rounded to the nearest second, like Redis
                let remaining = at.saturating_duration_since(now).as_millis();
                ((remaining + 500) / 1000) as i64
            }))
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, DomainError> {
        let mut entries = self.entries.write().await;
        match live(&mut entries, key, Instant::now()) {
            Some(Entry {
                value: Value::Set(members),
                ..
            }) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(wrong_type(key)),
            None => Ok(Vec::new()),
        }
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let emptied = match live(&mut entries, key, Instant::now()) {
            Some(Entry {
                value: Value::Set(members),
                ..
            }) => {
                members.remove(member);
                members.is_empty()
            }
            Some(_) => return Err(wrong_type(key)),
            None => false,
        };
        if emptied {
            entries.remove(key);
        }
        Ok(())
    }

    async fn set_indexed(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
        index_key: &str,
        member: &str,
    ) -> Result<(), DomainError> {
        if seconds == 0 {
            return Err(DomainError::store("invalid expire time in 'set_indexed'"));
        }
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let at = expiry(now, seconds);

        // Validate the index before touching anything
        match live(&mut entries, index_key, now) {
            Some(Entry {
                value: Value::Set(_),
                ..
            })
            | None => {}
            Some(_) => return Err(wrong_type(index_key)),
        }

        entries.insert(key.to_string(), Entry::string(value, Some(at)));

        let index = entries.entry(index_key.to_string()).or_insert_with(|| Entry {
            value: Value::Set(HashSet::new()),
            expires_at: None,
        });
        if let Value::Set(members) = &mut index.value {
            members.insert(member.to_string());
        }
        index.expires_at = Some(index.expires_at.map_or(at, |current| current.max(at)));
        Ok(())
    }

    async fn delete_indexed(
        &self,
        key: &str,
        index_key: &str,
        member: &str,
    ) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let existed = live(&mut entries, key, now).is_some();
        entries.remove(key);

        let emptied = match live(&mut entries, index_key, now) {
            Some(Entry {
                value: Value::Set(members),
                ..
            }) => {
                members.remove(member);
                members.is_empty()
            }
            _ => false,
        };
        if emptied {
            entries.remove(index_key);
        }
        Ok(existed)
    }
}
