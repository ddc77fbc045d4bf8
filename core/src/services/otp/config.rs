//! Configuration for the OTP service

use std::time::Duration;

use chrono::Utc;
use ilon_shared::OtpConfig;

use crate::domain::value_objects::OtpLength;
use crate::errors::{DomainError, DomainResult};

/// Longest accepted code validity (one day)
pub const MAX_TTL_SECONDS: u64 = 86_400;

/// Longest accepted issuance window (one week)
pub const MAX_ISSUANCE_WINDOW_SECONDS: u64 = 7 * 86_400;

/// Validated settings for [`super::OtpService`]
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Digits per generated code
    pub code_length: OtpLength,
    /// How long a code stays valid
    pub ttl: Duration,
    /// Wrong guesses allowed per code
    pub max_attempts: u32,
    /// Codes allowed per phone number per window (0 disables the cap)
    pub issuance_limit: u32,
    /// Length of the issuance window
    pub issuance_window: Duration,
    /// Emit generated codes at debug level (development only)
    pub log_codes: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: OtpLength::default(),
            ttl: Duration::from_secs(300),
            max_attempts: 3,
            issuance_limit: 5,
            issuance_window: Duration::from_secs(3600),
            log_codes: false,
        }
    }
}

impl OtpServiceConfig {
    /// Builds service settings from loaded configuration.
    ///
    /// Codes are logged only when `log_codes` is set and the caller allows
    /// it for the current environment.
    pub fn from_config(config: &OtpConfig, allow_code_logging: bool) -> DomainResult<Self> {
        let code_length = OtpLength::new(config.code_length)?;

        if config.ttl_seconds == 0 {
            return Err(DomainError::Configuration {
                message: "OTP TTL must be at least one second".to_string(),
            });
        }
        if config.ttl_seconds > MAX_TTL_SECONDS {
            return Err(DomainError::Configuration {
                message: format!("OTP TTL must not exceed {} seconds", MAX_TTL_SECONDS),
            });
        }
        let ttl = Duration::from_secs(config.ttl_seconds);
        chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| DomainError::Configuration {
                message: "OTP TTL is out of range".to_string(),
            })?;
        if config.max_attempts == 0 {
            return Err(DomainError::Configuration {
                message: "OTP max attempts must be at least 1".to_string(),
            });
        }
        if config.issuance_limit > 0 && config.issuance_window_seconds == 0 {
            return Err(DomainError::Configuration {
                message: "OTP issuance window must be set when an issuance limit is configured"
                    .to_string(),
            });
        }
        if config.issuance_window_seconds > MAX_ISSUANCE_WINDOW_SECONDS {
            return Err(DomainError::Configuration {
                message: format!(
                    "OTP issuance window must not exceed {} seconds",
                    MAX_ISSUANCE_WINDOW_SECONDS
                ),
            });
        }

        Ok(Self {
            code_length,
            ttl,
            max_attempts: config.max_attempts,
            issuance_limit: config.issuance_limit,
            issuance_window: Duration::from_secs(config.issuance_window_seconds),
            log_codes: config.log_codes && allow_code_logging,
        })
    }

    /// Validity window in whole minutes, rounded up
    pub fn ttl_minutes(&self) -> u64 {
        self.ttl.as_secs().div_ceil(60)
    }
}
