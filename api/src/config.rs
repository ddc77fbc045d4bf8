//! Configuration loading
//!
//! Layers, later sources winning:
//! 1. Built-in defaults for the environment (`AppConfig::for_environment`)
//! 2. Optional `config/<environment>.toml`
//! 3. Environment variables prefixed `ILON__`, sections split by `__`,
//!    e.g. `ILON__OTP__TTL_SECONDS=120` or `ILON__CACHE__BACKEND=redis`

use config::{Config, ConfigError, File};
use thiserror::Error;

use ilon_shared::{AppConfig, Environment};

const ENV_PREFIX: &str = "ILON";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to load configuration: {0}")]
    Source(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Load configuration for the environment named by `ENVIRONMENT` / `ENV`
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    load_for(Environment::from_env())
}

/// Load configuration for an explicit environment
pub fn load_for(environment: Environment) -> Result<AppConfig, ConfigLoadError> {
    let defaults = AppConfig::for_environment(environment);

    let mut loaded: AppConfig = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    // The environment is decided by ENVIRONMENT, not by the file contents
    loaded.environment = environment;
    validate(&loaded)?;
    Ok(loaded)
}

/// Reject settings that must never reach a running server
pub fn validate(config: &AppConfig) -> Result<(), ConfigLoadError> {
    if !config.environment.is_development() {
        if config.jwt.secret.trim().is_empty() {
            return Err(ConfigLoadError::Invalid(
                "jwt.secret must be set outside development (ILON__JWT__SECRET)".to_string(),
            ));
        }
        if config.jwt.is_using_default_secret() {
            return Err(ConfigLoadError::Invalid(
                "jwt.secret is still the development default".to_string(),
            ));
        }
    }
    if config.server.port == 0 {
        return Err(ConfigLoadError::Invalid("server.port must not be 0".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilon_shared::{CacheBackend, JwtConfig};

    #[test]
    fn test_development_defaults_load() {
        let config = load_for(Environment::Development).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.otp.ttl_seconds, 300);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("ILON__OTP__ISSUANCE_WINDOW_SECONDS", "1800");
        let config = load_for(Environment::Development).unwrap();
        std::env::remove_var("ILON__OTP__ISSUANCE_WINDOW_SECONDS");

        assert_eq!(config.otp.issuance_window_seconds, 1800);
    }

    #[test]
    fn test_production_requires_secret() {
        let mut config = AppConfig::production();
        assert!(validate(&config).is_err());

        config.jwt = JwtConfig::default();
        assert!(validate(&config).is_err());

        config.jwt = JwtConfig::new("a-real-production-secret");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_development_accepts_default_secret() {
        assert!(validate(&AppConfig::development()).is_ok());
    }
}
