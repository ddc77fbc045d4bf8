//! Process-local OTP store
//!
//! Entries live in a map behind a Tokio mutex. Expiry is checked lazily on
//! every read and, optionally, swept by a background task so abandoned
//! entries do not accumulate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use ilon_core::domain::{OtpEntry, PhoneNumber};
use ilon_core::services::otp::{ConsumeOutcome, OtpStoreTrait, StoreResult};

struct StoredOtp {
    entry: OtpEntry,
    deadline: Instant,
}

impl StoredOtp {
    fn is_live(&self, now: Instant) -> bool {
        now < self.deadline
    }
}

/// In-memory OTP store for single-instance deployments and tests
#[derive(Default)]
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<String, StoredOtp>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every expired entry, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, stored| stored.is_live(now));
        before - entries.len()
    }

    /// Number of entries currently held, expired or not
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Start a task that purges expired entries every `every`.
    ///
    /// The task holds a weak reference and stops once the store is dropped.
    pub fn spawn_purge_task(store: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(store);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = weak.upgrade() else {
                    break;
                };
                let removed = store.purge_expired().await;
                if removed > 0 {
                    debug!(removed, "Purged expired OTP entries");
                }
            }
        })
    }
}

#[async_trait]
impl OtpStoreTrait for InMemoryOtpStore {
    async fn set(&self, entry: &OtpEntry, ttl: Duration) -> StoreResult<()> {
        let stored = StoredOtp {
            entry: entry.clone(),
            deadline: Instant::now() + ttl,
        };
        self.entries
            .lock()
            .await
            .insert(entry.phone_number.storage_key(), stored);
        Ok(())
    }

    async fn get(&self, phone: &PhoneNumber) -> StoreResult<Option<OtpEntry>> {
        let key = phone.storage_key();
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match entries.get(&key) {
            Some(stored) if stored.is_live(now) => Ok(Some(stored.entry.clone())),
            Some(_) => {
                entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, phone: &PhoneNumber) -> StoreResult<()> {
        self.entries.lock().await.remove(&phone.storage_key());
        Ok(())
    }

    async fn consume(
        &self,
        phone: &PhoneNumber,
        submitted: &str,
        max_attempts: u32,
    ) -> StoreResult<ConsumeOutcome> {
        let key = phone.storage_key();
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let outcome = match entries.get_mut(&key) {
            None => return Ok(ConsumeOutcome::Absent),
            Some(stored) if !stored.is_live(now) => None,
            Some(stored) if stored.entry.code.matches(submitted) => Some(ConsumeOutcome::Matched),
            Some(stored) => {
                stored.entry.attempts += 1;
                if stored.entry.attempts >= max_attempts {
                    Some(ConsumeOutcome::Exhausted)
                } else {
                    Some(ConsumeOutcome::Mismatched {
                        remaining_attempts: stored.entry.remaining_attempts(max_attempts),
                    })
                }
            }
        };

        match outcome {
            None => {
                entries.remove(&key);
                Ok(ConsumeOutcome::Absent)
            }
            Some(outcome @ (ConsumeOutcome::Matched | ConsumeOutcome::Exhausted)) => {
                entries.remove(&key);
                Ok(outcome)
            }
            Some(outcome) => Ok(outcome),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
