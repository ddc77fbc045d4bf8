//! Types for OTP service results

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::PhoneNumber;

/// Outcome of an atomic compare-and-remove on the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// Code matched; the entry has been removed
    Matched,
    /// Code did not match; the entry is kept
    Mismatched { remaining_attempts: u32 },
    /// Code did not match and the attempt budget is spent; the entry is gone
    Exhausted,
    /// Nothing outstanding: never issued, expired, or already consumed
    Absent,
}

/// Usage of a rate limiter window after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowUsage {
    /// Hits counted in the current window, including this one
    pub count: u32,
    /// Time until the window resets
    pub resets_in: Duration,
}

/// Result of issuing an OTP
#[derive(Debug, Clone)]
pub struct OtpIssued {
    /// Phone number the code was issued to
    pub phone_number: PhoneNumber,
    /// Human-readable confirmation, includes the normalized phone number
    pub message: String,
    /// When the code was issued
    pub issued_at: DateTime<Utc>,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Result of verifying an OTP
#[derive(Debug, Clone)]
pub struct OtpVerification {
    /// Whether the code was accepted
    pub is_valid: bool,
    /// Session token, present only when the code was accepted
    pub token: Option<String>,
    /// Generic failure message, present only when the code was rejected
    pub error_message: Option<String>,
}

impl OtpVerification {
    pub(crate) fn accepted(token: String) -> Self {
        Self {
            is_valid: true,
            token: Some(token),
            error_message: None,
        }
    }

    pub(crate) fn rejected(message: &str) -> Self {
        Self {
            is_valid: false,
            token: None,
            error_message: Some(message.to_string()),
        }
    }
}
