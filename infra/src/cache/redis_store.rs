//! Redis-backed OTP store
//!
//! Each outstanding code is a hash under `[prefix:]otp:{phone}` with the
//! fields `code`, `digest`, `issued_at`, `expires_at` and `attempts`, and a
//! millisecond TTL matching the code's validity. Verification runs as one
//! Lua script, so concurrent verifications of the same code are serialized
//! by Redis and only one of them can match.
//!
//! Verification only ever reads `digest`. The plaintext `code` field is kept
//! because [`OtpStoreTrait::get`] returns the full [`OtpEntry`], code
//! included, for out-of-band delivery and operator inspection; it expires
//! with the rest of the hash.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Script};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use ilon_core::domain::{OtpCode, OtpEntry, PhoneNumber};
use ilon_core::errors::StoreError;
use ilon_core::services::otp::{ConsumeOutcome, OtpStoreTrait, StoreResult};

use super::{backend_error, CacheConfig, RedisClient};

/// Compare-and-remove with attempt counting.
///
/// Returns `{status, remaining}` where status is 0 absent, 1 matched,
/// 2 mismatched, 3 exhausted.
const CONSUME_SCRIPT: &str = r#"
local digest = redis.call('HGET', KEYS[1], 'digest')
if not digest then
  return {0, 0}
end
if digest == ARGV[1] then
  redis.call('DEL', KEYS[1])
  return {1, 0}
end
local attempts = redis.call('HINCRBY', KEYS[1], 'attempts', 1)
local max = tonumber(ARGV[2])
if attempts >= max then
  redis.call('DEL', KEYS[1])
  return {3, 0}
end
return {2, max - attempts}
"#;

const FIELD_CODE: &str = "code";
const FIELD_DIGEST: &str = "digest";
const FIELD_ISSUED_AT: &str = "issued_at";
const FIELD_EXPIRES_AT: &str = "expires_at";
const FIELD_ATTEMPTS: &str = "attempts";

/// OTP store shared by every instance through Redis
pub struct RedisOtpStore {
    client: RedisClient,
    config: CacheConfig,
    consume_script: Script,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self {
            client,
            config,
            consume_script: Script::new(CONSUME_SCRIPT),
        }
    }

    fn key(&self, phone: &PhoneNumber) -> String {
        self.config.make_key(&phone.storage_key())
    }

    fn parse_entry(
        key: &str,
        phone: &PhoneNumber,
        mut fields: HashMap<String, String>,
    ) -> StoreResult<OtpEntry> {
        let corrupt = |reason: String| StoreError::Corrupt {
            key: key.to_string(),
            reason,
        };

        let code = fields
            .remove(FIELD_CODE)
            .ok_or_else(|| corrupt(format!("missing field '{}'", FIELD_CODE)))?;
        let issued_at = parse_timestamp(fields.get(FIELD_ISSUED_AT), FIELD_ISSUED_AT)
            .map_err(corrupt)?;
        let expires_at = parse_timestamp(fields.get(FIELD_EXPIRES_AT), FIELD_EXPIRES_AT)
            .map_err(corrupt)?;
        let attempts = fields
            .get(FIELD_ATTEMPTS)
            .map(|raw| raw.parse::<u32>())
            .transpose()
            .map_err(|e| corrupt(format!("bad attempts: {}", e)))?
            .unwrap_or(0);

        Ok(OtpEntry {
            phone_number: phone.clone(),
            code: OtpCode::from_stored(code),
            issued_at,
            expires_at,
            attempts,
        })
    }
}

/// Digest stored next to the code and compared inside Redis
///
/// Salted with the key so equal codes for different numbers differ.
pub(crate) fn code_digest(key: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

fn parse_timestamp(raw: Option<&String>, field: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.ok_or_else(|| format!("missing field '{}'", field))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("bad {}: {}", field, e))
}

#[async_trait]
impl OtpStoreTrait for RedisOtpStore {
    async fn set(&self, entry: &OtpEntry, ttl: Duration) -> StoreResult<()> {
        let key = self.key(&entry.phone_number);
        let fields = [
            (FIELD_CODE, entry.code.as_str().to_string()),
            (FIELD_DIGEST, code_digest(&key, entry.code.as_str())),
            (FIELD_ISSUED_AT, entry.issued_at.to_rfc3339()),
            (FIELD_EXPIRES_AT, entry.expires_at.to_rfc3339()),
            (FIELD_ATTEMPTS, entry.attempts.to_string()),
        ];
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX).max(1);

        let mut conn = self.client.connection();
        redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, &fields[..])
            .ignore()
            .pexpire(&key, ttl_ms)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(backend_error)?;

        debug!(ttl_ms, "Stored OTP entry in Redis");
        Ok(())
    }

    async fn get(&self, phone: &PhoneNumber) -> StoreResult<Option<OtpEntry>> {
        let key = self.key(phone);
        let mut conn = self.client.connection();
        let fields: HashMap<String, String> = conn.hgetall(&key).await.map_err(backend_error)?;

        if fields.is_empty() {
            return Ok(None);
        }

        let entry = Self::parse_entry(&key, phone, fields)?;
        if entry.is_expired_at(Utc::now()) {
            return Ok(None);
        }
        Ok(Some(entry))
    }

    async fn delete(&self, phone: &PhoneNumber) -> StoreResult<()> {
        let key = self.key(phone);
        let mut conn = self.client.connection();
        conn.del::<_, ()>(&key).await.map_err(backend_error)
    }

    async fn consume(
        &self,
        phone: &PhoneNumber,
        submitted: &str,
        max_attempts: u32,
    ) -> StoreResult<ConsumeOutcome> {
        let key = self.key(phone);
        let mut conn = self.client.connection();

        let (status, remaining): (i64, i64) = self
            .consume_script
            .key(&key)
            .arg(code_digest(&key, submitted))
            .arg(max_attempts)
            .invoke_async(&mut conn)
            .await
            .map_err(backend_error)?;

        match status {
            0 => Ok(ConsumeOutcome::Absent),
            1 => Ok(ConsumeOutcome::Matched),
            2 => Ok(ConsumeOutcome::Mismatched {
                remaining_attempts: u32::try_from(remaining).unwrap_or(0),
            }),
            3 => Ok(ConsumeOutcome::Exhausted),
            other => Err(StoreError::Corrupt {
                key,
                reason: format!("unexpected consume status {}", other),
            }),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client.ping().await.map_err(backend_error)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
