//! Account service configuration

use gk_shared::config::AppConfig;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Base URL of the front end, used for links in emails
    pub public_url: String,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            public_url: String::from("http://localhost:3000"),
        }
    }
}

impl From<&AppConfig> for AccountServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            public_url: config.public_url.clone(),
        }
    }
}

impl AccountServiceConfig {
    pub(crate) fn link(&self, path: &str, token: &str) -> String {
        format!("{}/{}/{}", self.public_url.trim_end_matches('/'), path, token)
    }
}
