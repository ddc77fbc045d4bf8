//! Redis cache client implementation
//!
//! Owns the multiplexed connection shared by the Redis OTP store and rate
//! limiter. Only connection establishment is retried; individual commands
//! are not, since re-running an issuance would mint a second code.

use redis::{aio::MultiplexedConnection, Client, RedisError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Upper bound for the connection backoff
const MAX_RETRY_DELAY_MS: u64 = 5000;

/// Redis client with a shared multiplexed connection
///
/// Cloning is cheap: clones share the same underlying connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Connect using the URL and retry settings from `config`
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - the URL does not parse
    /// * `Err(InfrastructureError::Cache)` - the server stayed unreachable
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            config.max_retries.max(1),
            config.retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self { connection })
    }

    /// Create multiplexed connection with exponential backoff
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => {
                    error!(
                        "Failed to connect to Redis after {} attempts: {}",
                        attempts, e
                    );
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Handle to the shared connection for issuing commands
    pub fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Check connectivity with a PING
    pub async fn ping(&self) -> Result<(), RedisError> {
        let mut conn = self.connection();
        let response: String = redis::cmd("PING").query_async(&mut conn).await?;
        if response != "PONG" {
            warn!("Redis health check returned unexpected response: {}", response);
        }
        Ok(())
    }
}

/// Check if a Redis error is transient
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
