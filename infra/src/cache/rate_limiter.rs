//! Fixed-window issuance counters
//!
//! The window opens with the first hit on a key and lasts the requested
//! duration; the count resets when it closes.

use async_trait::async_trait;
use redis::Script;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use ilon_core::services::otp::{RateLimiterTrait, StoreResult, WindowUsage};

use super::{backend_error, CacheConfig, RedisClient};

/// Increment and report `{count, pttl}`, arming the expiry on first hit
const HIT_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
if count == 1 then
  redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
local ttl = redis.call('PTTL', KEYS[1])
if ttl < 0 then
  redis.call('PEXPIRE', KEYS[1], ARGV[1])
  ttl = tonumber(ARGV[1])
end
return {count, ttl}
"#;

/// Process-local fixed-window counter
#[derive(Default)]
pub struct InMemoryRateLimiter {
    windows: Mutex<HashMap<String, (u32, Instant)>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every closed window, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, (_, resets_at)| *resets_at > now);
        before - windows.len()
    }

    /// Number of windows currently tracked, closed or not
    pub async fn len(&self) -> usize {
        self.windows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.windows.lock().await.is_empty()
    }

    /// Start a task that drops closed windows every `every`.
    ///
    /// Stops once the limiter is dropped.
    pub fn spawn_purge_task(limiter: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(limiter);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(limiter) = weak.upgrade() else {
                    break;
                };
                let removed = limiter.purge_expired().await;
                if removed > 0 {
                    debug!(removed, "Purged closed issuance windows");
                }
            }
        })
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn hit(&self, key: &str, window: Duration) -> StoreResult<WindowUsage> {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        let (count, resets_at) = windows
            .entry(key.to_string())
            .or_insert((0, now + window));
        if *resets_at <= now {
            *count = 0;
            *resets_at = now + window;
        }
        *count += 1;

        Ok(WindowUsage {
            count: *count,
            resets_in: resets_at.saturating_duration_since(now),
        })
    }
}

/// Fixed-window counter shared through Redis
pub struct RedisRateLimiter {
    client: RedisClient,
    config: CacheConfig,
    script: Script,
}

impl RedisRateLimiter {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self {
            client,
            config,
            script: Script::new(HIT_SCRIPT),
        }
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn hit(&self, key: &str, window: Duration) -> StoreResult<WindowUsage> {
        let key = self.config.make_key(key);
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX).max(1);
        let mut conn = self.client.connection();

        let (count, ttl_ms): (i64, i64) = self
            .script
            .key(&key)
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(backend_error)?;

        Ok(WindowUsage {
            count: u32::try_from(count).unwrap_or(u32::MAX),
            resets_in: Duration::from_millis(u64::try_from(ttl_ms).unwrap_or(0)),
        })
    }
}
