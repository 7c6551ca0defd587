//! Liveness probes over the configured adapters

use async_trait::async_trait;

use crate::cache::RedisClient;
#[cfg(feature = "mysql")]
use crate::database::DatabasePool;

/// Backing service the health endpoint reports on
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Name reported in the health body
    fn name(&self) -> &'static str;

    /// Failures are logged by the adapter and reported as `false`
    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl HealthProbe for RedisClient {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn is_healthy(&self) -> bool {
        matches!(self.health_check().await, Ok(true))
    }
}

#[cfg(feature = "mysql")]
#[async_trait]
impl HealthProbe for DatabasePool {
    fn name(&self) -> &'static str {
        "mysql"
    }

    async fn is_healthy(&self) -> bool {
        matches!(self.health_check().await, Ok(true))
    }
}
