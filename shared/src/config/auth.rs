//! Session token configuration

use serde::{Deserialize, Serialize};

const DEVELOPMENT_SECRET: &str = "ilon-development-secret-change-in-production";

/// JWT configuration for the session artifact issued after verification
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC secret used to sign session tokens
    pub secret: String,

    /// Session token lifetime in seconds
    pub session_expiry_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            session_expiry_seconds: 900,  // 15 minutes
            issuer: String::from("ilon"),
            audience: String::from("ilon-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session expiry in minutes
    pub fn with_session_expiry_minutes(mut self, minutes: i64) -> Self {
        self.session_expiry_seconds = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}
