//! Redis-backed key-value store
//!
//! Wraps a multiplexed connection with retry logic and implements the
//! `KeyValueStore` port used by the token and session services. All keys are
//! namespaced with the configured prefix; set members are stored verbatim.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use gk_core::errors::DomainError;
use gk_core::repositories::KeyValueStore;
use gk_shared::config::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with connection multiplexing and retry logic
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Connect to Redis using the given configuration
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - URL missing or unparseable
    /// * `Err(InfrastructureError::Cache)` - Connection failed after all retries
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .url
            .clone()
            .ok_or_else(|| InfrastructureError::Config("Redis URL is not configured".into()))?;

        info!("Creating Redis client with URL: {}", mask_url(&url));

        let client = Client::open(url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, config.max_retries, config.retry_delay_ms)
                .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let result = self
            .execute_with_retry("PING", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Execute a Redis operation with exponential backoff on transient failures
    ///
    /// Non-idempotent commands run once: a failed reply does not prove the
    /// command never reached the server.
    async fn execute_with_retry<F, T>(&self, op: &str, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.config.max_retries && should_retry(op, &e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.config.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn run<F, T>(&self, op: &str, key: &str, operation: F) -> Result<T, DomainError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        self.execute_with_retry(op, operation).await.map_err(|e| {
            error!("Redis {} failed for key '{}': {}", op, key, e);
            InfrastructureError::Cache(e).into()
        })
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let key = self.key(key);
        self.run("GET", &key, |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let key = self.key(key);
        self.run("SET", &key, |mut conn| {
            let key = key.clone();
            let value = value.to_string();
            Box::pin(async move { conn.set::<_, _, ()>(key, value).await })
        })
        .await
    }

    async fn set_nx(&self, key: &str, value: &str) -> Result<bool, DomainError> {
        let key = self.key(key);
        self.run("SETNX", &key, |mut conn| {
            let key = key.clone();
            let value = value.to_string();
            Box::pin(async move { conn.set_nx::<_, _, bool>(key, value).await })
        })
        .await
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> Result<(), DomainError> {
        let key = self.key(key);
        debug!("Setting key '{}' with expiry {}s", key, seconds);
        self.run("SETEX", &key, |mut conn| {
            let key = key.clone();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, seconds).await })
        })
        .await
    }

    async fn incr(&self, key: &str) -> Result<i64, DomainError> {
        let key = self.key(key);
        self.run("INCR", &key, |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.incr::<_, _, i64>(key, 1).await })
        })
        .await
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, DomainError> {
        let key = self.key(key);
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        self.run("EXPIRE", &key, |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.expire::<_, bool>(key, seconds).await })
        })
        .await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let key = self.key(key);
        self.run("EXISTS", &key, |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let key = self.key(key);
        let deleted = self
            .run("DEL", &key, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await?;
        Ok(deleted > 0)
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError> {
        let key = self.key(key);
        let ttl = self
            .run("TTL", &key, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await?;

        // -1: no expiry, -2: missing
        Ok((ttl >= 0).then_some(ttl))
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, DomainError> {
        let key = self.key(key);
        self.run("SMEMBERS", &key, |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.smembers::<_, Vec<String>>(key).await })
        })
        .await
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<(), DomainError> {
        let key = self.key(key);
        self.run("SREM", &key, |mut conn| {
            let key = key.clone();
            let member = member.to_string();
            Box::pin(async move { conn.srem::<_, _, ()>(key, member).await })
        })
        .await
    }

    async fn set_indexed(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
        index_key: &str,
        member: &str,
    ) -> Result<(), DomainError> {
        let key = self.key(key);
        let index_key = self.key(index_key);
        debug!("Writing '{}' with expiry {}s, indexed under '{}'", key, seconds, index_key);

        // EXPIRE NX covers a fresh index, EXPIRE GT only ever extends an existing one (Redis 7+)
        self.run("SET+SADD", &key, |mut conn| {
            let key = key.clone();
            let value = value.to_string();
            let index_key = index_key.clone();
            let member = member.to_string();
            Box::pin(async move {
                let mut pipe = redis::pipe();
                pipe.atomic()
                    .set_ex(&key, &value, seconds)
                    .ignore()
                    .sadd(&index_key, &member)
                    .ignore()
                    .cmd("EXPIRE")
                    .arg(&index_key)
                    .arg(seconds)
                    .arg("NX")
                    .ignore()
                    .cmd("EXPIRE")
                    .arg(&index_key)
                    .arg(seconds)
                    .arg("GT")
                    .ignore();
                pipe.query_async::<_, ()>(&mut conn).await
            })
        })
        .await
    }

    async fn delete_indexed(
        &self,
        key: &str,
        index_key: &str,
        member: &str,
    ) -> Result<bool, DomainError> {
        let key = self.key(key);
        let index_key = self.key(index_key);
        let (deleted,) = self
            .run("DEL+SREM", &key, |mut conn| {
                let key = key.clone();
                let index_key = index_key.clone();
                let member = member.to_string();
                Box::pin(async move {
                    let mut pipe = redis::pipe();
                    pipe.atomic().del(&key).srem(&index_key, &member).ignore();
                    pipe.query_async::<_, (u32,)>(&mut conn).await
                })
            })
            .await?;
        Ok(deleted > 0)
    }
}

/// Check if a Redis error is transient and the operation should be retried
/// Commands that must not be replayed after an ambiguous failure
const NON_IDEMPOTENT: &[&str] = &["INCR"];

/// Whether a failed command may be sent again
pub(crate) fn should_retry(op: &str, error: &RedisError) -> bool {
    !NON_IDEMPOTENT.contains(&op) && is_retriable_error(error)
}

pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
