//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

/// OTP issuance and verification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in a generated code (4-10)
    pub code_length: usize,

    /// Seconds a code stays valid after issuance
    pub ttl_seconds: u64,

    /// Wrong guesses allowed per code before it is discarded
    pub max_attempts: u32,

    /// Codes a single phone number may request per issuance window (0 = unlimited)
    pub issuance_limit: u32,

    /// Length of the issuance window in seconds
    pub issuance_window_seconds: u64,

    /// Write raw codes to the debug log (honoured in development only)
    pub log_codes: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 300,  // 5 minutes
            max_attempts: 3,
            issuance_limit: 5,
            issuance_window_seconds: 3600,  // 1 hour
            log_codes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_default() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.ttl_seconds, 300);
        assert_eq!(config.max_attempts, 3);
        assert!(!config.log_codes);
    }
}
