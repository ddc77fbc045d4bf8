//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::OtpEntry;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::StoreError;
use crate::services::otp::{
    ConsumeOutcome, OtpStoreTrait, RateLimiterTrait, StoreResult, WindowUsage,
};

// Mock OTP store keyed the same way as the real backends
pub struct MockOtpStore {
    pub entries: Arc<Mutex<HashMap<String, OtpEntry>>>,
    pub should_fail: bool,
}

impl MockOtpStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn stored_code(&self, phone: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(&format!("otp:{}", phone))
            .map(|entry| entry.code.as_str().to_string())
    }

    pub fn stored_entry(&self, phone: &str) -> Option<OtpEntry> {
        self.entries.lock().unwrap().get(&format!("otp:{}", phone)).cloned()
    }

    /// Moves the expiry of a stored entry into the past
    pub fn expire(&self, phone: &str) {
        if let Some(entry) = self.entries.lock().unwrap().get_mut(&format!("otp:{}", phone)) {
            entry.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }

    fn check(&self) -> StoreResult<()> {
        if self.should_fail {
            return Err(StoreError::Backend("Cache service error".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OtpStoreTrait for MockOtpStore {
    async fn set(&self, entry: &OtpEntry, _ttl: Duration) -> StoreResult<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(entry.phone_number.storage_key(), entry.clone());
        Ok(())
    }

    async fn get(&self, phone: &PhoneNumber) -> StoreResult<Option<OtpEntry>> {
        self.check()?;
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(&phone.storage_key())
            .filter(|entry| !entry.is_expired_at(Utc::now()))
            .cloned())
    }

    async fn delete(&self, phone: &PhoneNumber) -> StoreResult<()> {
        self.check()?;
        self.entries.lock().unwrap().remove(&phone.storage_key());
        Ok(())
    }

    async fn consume(
        &self,
        phone: &PhoneNumber,
        submitted: &str,
        max_attempts: u32,
    ) -> StoreResult<ConsumeOutcome> {
        self.check()?;
        let key = phone.storage_key();
        let mut entries = self.entries.lock().unwrap();

        let Some(entry) = entries.get_mut(&key) else {
            return Ok(ConsumeOutcome::Absent);
        };
        if entry.is_expired_at(Utc::now()) {
            entries.remove(&key);
            return Ok(ConsumeOutcome::Absent);
        }
        if entry.code.matches(submitted) {
            entries.remove(&key);
            return Ok(ConsumeOutcome::Matched);
        }

        entry.attempts += 1;
        if entry.attempts >= max_attempts {
            entries.remove(&key);
            return Ok(ConsumeOutcome::Exhausted);
        }
        Ok(ConsumeOutcome::Mismatched {
            remaining_attempts: entry.remaining_attempts(max_attempts),
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

// Mock rate limiter counting hits without ever resetting
pub struct MockRateLimiter {
    pub hits: Arc<Mutex<HashMap<String, u32>>>,
}

impl MockRateLimiter {
    pub fn new() -> Self {
        Self {
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl RateLimiterTrait for MockRateLimiter {
    async fn hit(&self, key: &str, window: Duration) -> StoreResult<WindowUsage> {
        let mut hits = self.hits.lock().unwrap();
        let count = hits.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(WindowUsage {
            count: *count,
            resets_in: window,
        })
    }
}
