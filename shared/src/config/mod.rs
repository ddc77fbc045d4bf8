//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token (JWT) configuration
//! - `cache` - OTP storage backend configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP lifecycle (length, TTL, attempt and issuance limits)
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::{CacheBackend, CacheConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
///
/// Every section falls back to its defaults, so a partial configuration
/// source (a single env var, a short TOML file) deserializes cleanly.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// OTP storage configuration
    pub cache: CacheConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpConfig::default(),
            jwt: JwtConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            cache: CacheConfig::redis("redis://redis:6379"),
            jwt: JwtConfig::new(""),
            logging: LoggingConfig::for_environment(Environment::Production),
            ..Default::default()
        }
    }

    /// Baseline configuration for an environment, before file and env overrides
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Whether raw OTP codes may be written to the log
    ///
    /// Only ever true in development, whatever `otp.log_codes` says.
    pub fn allows_code_logging(&self) -> bool {
        self.otp.log_codes && self.environment.is_development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_never_logs_codes() {
        let mut config = AppConfig::production();
        config.otp.log_codes = true;
        assert!(!config.allows_code_logging());

        let mut dev = AppConfig::development();
        dev.otp.log_codes = true;
        assert!(dev.allows_code_logging());
    }

    #[test]
    fn test_staging_inherits_production_storage() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "otp": { "ttl_seconds": 120 } }"#)
            .expect("partial config should deserialize");
        assert_eq!(config.otp.ttl_seconds, 120);
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.server.port, 8080);
    }
}
