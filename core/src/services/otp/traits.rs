//! Traits for OTP storage and issuance rate limiting

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::OtpEntry;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::StoreError;

use super::types::{ConsumeOutcome, WindowUsage};

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store holding the outstanding OTP for each phone number
///
/// Implementations must be safe under concurrent callers. `set` is
/// last-writer-wins; `consume` must be a single atomic step so that two
/// interleaved verifications of one code cannot both succeed.
#[async_trait]
pub trait OtpStoreTrait: Send + Sync {
    /// Store an entry, replacing any existing one; the TTL starts now
    async fn set(&self, entry: &OtpEntry, ttl: Duration) -> StoreResult<()>;

    /// Fetch the live entry, or `None` if missing or expired
    async fn get(&self, phone: &PhoneNumber) -> StoreResult<Option<OtpEntry>>;

    /// Remove the entry immediately
    async fn delete(&self, phone: &PhoneNumber) -> StoreResult<()>;

    /// Atomically compare `submitted` with the stored code.
    ///
    /// On a match the entry is removed. On a mismatch the attempt counter is
    /// incremented, and the entry is removed once it reaches `max_attempts`.
    async fn consume(
        &self,
        phone: &PhoneNumber,
        submitted: &str,
        max_attempts: u32,
    ) -> StoreResult<ConsumeOutcome>;

    /// Check that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for health output
    fn backend_name(&self) -> &'static str;
}

/// Fixed-window counter used to throttle OTP issuance per phone number
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Count one hit against `key` and report usage of the current window.
    ///
    /// The window starts with the first hit and lasts `window`.
    async fn hit(&self, key: &str, window: Duration) -> StoreResult<WindowUsage>;
}
