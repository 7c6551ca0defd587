//! Configuration loading
//!
//! Layers, lowest precedence first: the environment preset, an optional
//! `config.<env>.toml` file, then `GATEKEEPER__*` variables
//! (`GATEKEEPER__AUTH__JWT__SECRET` sets `auth.jwt.secret`).

use config::{Config, ConfigError, File};

use gk_shared::config::{AppConfig, Environment};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "GATEKEEPER";

/// Load the application configuration for the current environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_for(Environment::from_env())
}

/// Load the application configuration for an explicit environment
pub fn load_config_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::for_environment(environment);

    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.environment = environment;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_environment_preset() {
        let config = load_config_for(Environment::Development).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert!(!config.auth.session.secure);
        assert_eq!(config.auth.jwt.access_token_expiry, 900);
    }

    #[test]
    fn test_production_preset_secures_cookies() {
        let config = load_config_for(Environment::Production).unwrap();
        assert!(config.auth.session.secure);
    }

    #[test]
    fn test_default_secret_is_left_to_the_issuer() {
        let mut config = load_config_for(Environment::Development).unwrap();
        config.auth.jwt.secret = gk_shared::config::JwtConfig::default().secret;

        // Loading stays silent; the issuer reports the default once tracing is up
        assert!(config.auth.jwt.is_using_default_secret());
        assert!(gk_core::services::JwtIssuer::new(&config.auth.jwt).is_ok());
    }
}
