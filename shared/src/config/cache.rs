//! OTP storage configuration module

use serde::{Deserialize, Serialize};

/// Storage backend for outstanding OTPs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local map; single instance deployments and tests only
    Memory,
    /// Redis, shared by every instance behind the load balancer
    Redis,
}

/// Cache configuration for OTP and issuance-counter storage
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Which backend holds OTP entries
    pub backend: CacheBackend,

    /// Redis connection URL (ignored by the memory backend)
    pub url: String,

    /// Connection attempts before startup gives up
    pub max_retries: u32,

    /// Base delay between connection attempts in milliseconds
    pub retry_delay_ms: u64,

    /// Optional prefix prepended to every key, e.g. `ilon:otp:+237...`
    pub key_prefix: Option<String>,

    /// Seconds between sweeps of expired entries (memory backend)
    pub cleanup_interval: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            url: String::from("redis://localhost:6379"),
            max_retries: 3,
            retry_delay_ms: 100,
            key_prefix: None,
            cleanup_interval: 60,  // 1 minute
        }
    }
}

impl CacheConfig {
    /// Create a Redis-backed configuration with URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}
