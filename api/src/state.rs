//! Application state shared by every worker

use std::sync::Arc;

use gk_core::errors::DomainError;
use gk_core::repositories::{KeyValueStore, UserRepository};
use gk_core::services::{
    AccountService, AccountServiceConfig, AuthTokenService, AuthTokenServiceConfig, JwtIssuer,
    JwtSessionService, Mailer, PasswordHasher, SessionLifecycle,
};
use gk_infra::HealthProbe;
use gk_shared::config::{AppConfig, SessionConfig};

/// Account flows over trait-object adapters chosen at startup
pub type Accounts = AccountService<dyn KeyValueStore, dyn UserRepository, dyn PasswordHasher, dyn Mailer>;

/// Session evaluation over trait-object adapters chosen at startup
pub type Sessions = SessionLifecycle<dyn KeyValueStore, dyn UserRepository>;

/// Application state that holds shared services
pub struct AppState {
    pub accounts: Arc<Accounts>,
    pub sessions: Arc<Sessions>,
    pub cookies: SessionConfig,
    /// Adapters reported by `/health`; empty when running on in-memory storage
    pub probes: Vec<Arc<dyn HealthProbe>>,
}

impl AppState {
    /// Wire the services from configuration and the selected adapters
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, DomainError> {
        let issuer = Arc::new(JwtIssuer::new(&config.auth.jwt)?);
        let jwt_sessions = Arc::new(JwtSessionService::new(Arc::clone(&store), issuer));
        let auth_tokens = Arc::new(AuthTokenService::new(
            store,
            AuthTokenServiceConfig::from(config),
        ));

        let accounts = AccountService::new(
            Arc::clone(&users),
            hasher,
            mailer,
            auth_tokens,
            Arc::clone(&jwt_sessions),
            AccountServiceConfig::from(config),
        );

        Ok(Self {
            accounts: Arc::new(accounts),
            sessions: Arc::new(SessionLifecycle::new(jwt_sessions, users)),
            cookies: config.auth.session.clone(),
            probes: Vec::new(),
        })
    }

    /// Report these adapters on `/health`
    pub fn with_probes(mut self, probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        self.probes = probes;
        self
    }
}
