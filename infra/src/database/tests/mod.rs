//! Unit tests for database connection pool

use gk_shared::config::DatabaseConfig;

use crate::database::connection::DatabasePool;
use crate::InfrastructureError;

#[tokio::test]
async fn test_pool_creation_with_invalid_url() {
    let config = DatabaseConfig::new("invalid://url");

    let result = DatabasePool::new(&config).await;
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_pool_creation_without_url() {
    let result = DatabasePool::new(&DatabaseConfig::default()).await;
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}
