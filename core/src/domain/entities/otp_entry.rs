//! Outstanding OTP entity.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::{OtpCode, PhoneNumber};

/// The code currently outstanding for a phone number.
///
/// At most one entry exists per phone number: storing a new entry replaces
/// the previous one. An entry disappears when its TTL elapses, when it is
/// consumed by a successful verification, or when its attempt budget runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    /// Phone number the code was issued to
    pub phone_number: PhoneNumber,

    /// The issued code
    pub code: OtpCode,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Wrong guesses recorded against this code
    pub attempts: u32,
}

impl OtpEntry {
    /// Creates a fresh entry issued at `issued_at` and valid for `ttl`.
    ///
    /// An expiry past the representable range saturates at the maximum date.
    pub fn new(
        phone_number: PhoneNumber,
        code: OtpCode,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            phone_number,
            code,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            attempts: 0,
        }
    }

    /// Checks whether the entry has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Total validity window of this entry
    pub fn ttl(&self) -> Duration {
        self.expires_at - self.issued_at
    }

    /// Wrong guesses still allowed before the entry is discarded
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}
