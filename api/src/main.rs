use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use gk_api::{config::load_config, create_app, telemetry::init_tracing, AppState};
use gk_core::repositories::{InMemoryStore, InMemoryUserRepository, KeyValueStore, UserRepository};
use gk_infra::{
    BcryptPasswordHasher, DatabasePool, HealthProbe, LogMailer, MySqlUserRepository, RedisClient,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Gatekeeper");

    let mut probes: Vec<Arc<dyn HealthProbe>> = Vec::new();

    let store: Arc<dyn KeyValueStore> = if config.cache.url.is_some() {
        let redis = Arc::new(
            RedisClient::new(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?,
        );
        probes.push(redis.clone());
        redis
    } else {
        warn!("No Redis URL configured; token state lives in process memory");
        Arc::new(InMemoryStore::new())
    };

    let users: Arc<dyn UserRepository> = if config.database.url.is_some() {
        let pool = DatabasePool::new(&config.database)
            .await
            .context("Failed to connect to MySQL")?;
        pool.run_migrations().await.context("Failed to run migrations")?;
        let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
        probes.push(Arc::new(pool));
        users
    } else {
        warn!("No database URL configured; users live in process memory");
        Arc::new(InMemoryUserRepository::new())
    };

    let state = web::Data::new(
        AppState::new(
            &config,
            store,
            users,
            Arc::new(BcryptPasswordHasher::new()),
            Arc::new(LogMailer::new()),
        )
        .context("Failed to build application state")?
        .with_probes(probes),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
