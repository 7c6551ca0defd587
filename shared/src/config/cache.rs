//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration for token records, version counters and rate counters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL; `None` selects the in-process store
    pub url: Option<String>,

    /// Maximum retry attempts for transient failures
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubled per attempt)
    pub retry_delay_ms: u64,

    /// Prefix prepended to every key, e.g. `gatekeeper`
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_retries: 3,
            retry_delay_ms: 100,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_with_prefix() {
        let config = CacheConfig::new("redis://localhost:6379").with_prefix("gk");
        assert_eq!(config.make_key("token:abc"), "gk:token:abc");
    }

    #[test]
    fn test_make_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("token:abc"), "token:abc");
        assert!(config.url.is_none());
    }
}
