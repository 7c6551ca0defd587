//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::{dev::ServiceResponse, web};
use async_trait::async_trait;

use gk_api::AppState;
use gk_core::domain::{Role, User};
use gk_core::errors::DomainError;
use gk_core::repositories::{InMemoryStore, InMemoryUserRepository, UserRepository};
use gk_core::services::{Mailer, OutboundEmail, PasswordHasher};
use gk_infra::{BcryptPasswordHasher, HealthProbe};
use gk_shared::config::{AppConfig, JwtConfig};

pub const PASSWORD: &str = "correct-horse-battery";

/// Mailer that keeps every email for inspection
#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl RecordingMailer {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Token at the end of the last link containing `/{path}/`
    pub fn last_token(&self, path: &str) -> Option<String> {
        let marker = format!("/{}/", path);
        let sent = self.sent.lock().unwrap();
        sent.iter().rev().find_map(|email| {
            email.body.lines().find_map(|line| {
                line.find(&marker)
                    .map(|idx| line[idx + marker.len()..].trim().to_string())
            })
        })
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Probe with a fixed answer
pub struct StaticProbe {
    pub name: &'static str,
    pub up: bool,
}

#[async_trait]
impl HealthProbe for StaticProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn is_healthy(&self) -> bool {
        self.up
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.jwt = JwtConfig::new("integration-test-secret-with-enough-entropy");
    config.rate_limit.auth_tokens.max_per_window = 3;
    config
}

pub struct TestContext {
    pub config: AppConfig,
    pub users: InMemoryUserRepository,
    pub mailer: RecordingMailer,
    pub hasher: BcryptPasswordHasher,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, Vec::new())
    }

    pub fn with_probes(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        Self::build(test_config(), probes)
    }

    fn build(config: AppConfig, probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        let users = InMemoryUserRepository::new();
        let mailer = RecordingMailer::default();
        let hasher = BcryptPasswordHasher::with_cost(4);

        let state = AppState::new(
            &config,
            Arc::new(InMemoryStore::new()),
            Arc::new(users.clone()),
            Arc::new(hasher),
            Arc::new(mailer.clone()),
        )
        .expect("state")
        .with_probes(probes);

        Self {
            config,
            users,
            mailer,
            hasher,
            state: web::Data::new(state),
        }
    }

    /// Store a user with `PASSWORD` and the given role
    pub async fn seed_user(&self, email: &str, role: Role) -> User {
        let hash = self.hasher.hash(PASSWORD).await.unwrap();
        let mut user = User::new("Test User", email, hash);
        if role != Role::Unverified {
            user.verify_email();
        }
        user.role = role;
        self.users.create(user).await.unwrap()
    }

    pub fn access_cookie(&self) -> &str {
        &self.config.auth.session.access_cookie_name
    }

    pub fn refresh_cookie(&self) -> &str {
        &self.config.auth.session.refresh_cookie_name
    }
}

/// Value of a cookie set on a response
pub fn cookie_value<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

pub fn sign_in_request(email: &str, password: &str) -> actix_web::test::TestRequest {
    actix_web::test::TestRequest::post()
        .uri("/api/v1/auth/sign-in")
        .set_json(serde_json::json!({ "email": email, "password": password }))
}
