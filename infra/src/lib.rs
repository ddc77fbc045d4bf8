//! # Infrastructure Layer
//!
//! Concrete implementations of the storage seams defined in `ilon_core`:
//!
//! - **Memory**: process-local OTP store and issuance counters, for single
//!   instance deployments and tests
//! - **Redis**: shared OTP store and issuance counters for deployments with
//!   more than one instance
//!
//! [`build_backends`] is the composition root for both; it reads
//! [`CacheConfig::backend`] and hands back trait objects.

use std::sync::Arc;
use std::time::Duration;

use ilon_core::services::otp::{OtpStoreTrait, RateLimiterTrait};
use ilon_shared::{CacheBackend, CacheConfig};

/// Cache module - OTP stores, rate limiters and the Redis client
pub mod cache;

use cache::{InMemoryOtpStore, InMemoryRateLimiter, RedisClient, RedisOtpStore, RedisRateLimiter};

/// OTP store and issuance limiter selected from configuration
#[derive(Clone)]
pub struct OtpBackends {
    pub store: Arc<dyn OtpStoreTrait>,
    pub limiter: Arc<dyn RateLimiterTrait>,
}

/// Build the OTP store and issuance limiter for the configured backend.
///
/// The memory backend starts background sweeps of expired entries and
/// closed issuance windows, and therefore must be called from within a
/// Tokio runtime. The Redis backend
/// connects eagerly so a bad URL or unreachable server fails startup.
pub async fn build_backends(config: &CacheConfig) -> Result<OtpBackends, InfrastructureError> {
    match config.backend {
        CacheBackend::Memory => {
            tracing::info!(
                cleanup_interval = config.cleanup_interval,
                "Using in-memory OTP store"
            );
            let store = Arc::new(InMemoryOtpStore::new());
            let limiter = Arc::new(InMemoryRateLimiter::new());
            if config.cleanup_interval > 0 {
                let every = Duration::from_secs(config.cleanup_interval);
                InMemoryOtpStore::spawn_purge_task(&store, every);
                InMemoryRateLimiter::spawn_purge_task(&limiter, every);
            }
            Ok(OtpBackends { store, limiter })
        }
        CacheBackend::Redis => {
            let client = RedisClient::connect(config).await?;
            tracing::info!("Using Redis OTP store");
            Ok(OtpBackends {
                store: Arc::new(RedisOtpStore::new(client.clone(), config.clone())),
                limiter: Arc::new(RedisRateLimiter::new(client, config.clone())),
            })
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_memory_backends() {
        let backends = build_backends(&CacheConfig::default()).await.unwrap();
        assert_eq!(backends.store.backend_name(), "memory");
        assert!(backends.store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_build_redis_backends_with_bad_url() {
        let config = CacheConfig::redis("not-a-redis-url");
        let result = build_backends(&config).await;
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}
