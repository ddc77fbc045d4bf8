//! Cache module for OTP storage
//!
//! This module provides the OTP store and issuance rate limiter backends,
//! plus the Redis client they share.

pub mod memory_store;
pub mod rate_limiter;
pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use memory_store::InMemoryOtpStore;
pub use rate_limiter::{InMemoryRateLimiter, RedisRateLimiter};
pub use redis_client::RedisClient;
pub use redis_store::RedisOtpStore;

// Re-export commonly used types
pub use ilon_shared::config::cache::CacheConfig;

use ilon_core::errors::StoreError;

/// Wrap a Redis failure for the storage seam
pub(crate) fn backend_error(error: redis::RedisError) -> StoreError {
    StoreError::Backend(error.to_string())
}
