mod jwt_session_tests;

use std::sync::Arc;

use gk_shared::config::JwtConfig;

use crate::domain::entities::user::{Role, User};
use crate::repositories::{InMemoryStore, InMemoryUserRepository};
use crate::services::session::{JwtSessionService, SessionLifecycle};
use crate::services::token::JwtIssuer;

/// Wired-up session components over in-memory adapters
pub(super) struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<JwtSessionService<InMemoryStore>>,
    pub lifecycle: SessionLifecycle<InMemoryStore, InMemoryUserRepository>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::new("session-test-secret"))
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let issuer = Arc::new(JwtIssuer::new(&config).unwrap());
        let sessions = Arc::new(JwtSessionService::new(store.clone(), issuer));
        let lifecycle = SessionLifecycle::new(sessions.clone(), users.clone());
        Self {
            store,
            users,
            sessions,
            lifecycle,
        }
    }

    pub async fn user(&self, role: Role) -> User {
        use crate::repositories::UserRepository;

        let mut user = User::new("Ada", &format!("{}@example.com", uuid::Uuid::new_v4()), "hash");
        user.role = role;
        self.users.create(user).await.unwrap()
    }
}
