//! Phone number value object for Cameroon (+237) and international numbers.

use std::fmt;

use ilon_shared::utils::phone::{mask_phone_number, normalize_phone_number};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Cameroon mobile numbers: +237 followed by exactly 9 digits
static CAMEROON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+237[0-9]{9}$").unwrap()
});

/// General international format: + then a non-zero digit and 7-14 more digits
static INTERNATIONAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9][0-9]{7,14}$").unwrap()
});

/// Key prefix for outstanding OTP entries
const STORAGE_KEY_PREFIX: &str = "otp";

/// Key prefix for issuance counters
const ISSUANCE_KEY_PREFIX: &str = "otp:issued";

/// A validated, normalized phone number.
///
/// Equality and hashing use the normalized value, so `+237 612 345 678` and
/// `+237-612-345-678` are the same number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a phone number from raw user input.
    ///
    /// Returns `None` for blank input or when the normalized value matches
    /// neither the Cameroon nor the international pattern. Callers treat
    /// `None` as the single "bad input" signal.
    pub fn create(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        let normalized = Self::normalize(raw);
        if !Self::matches_patterns(&normalized) {
            return None;
        }

        Some(Self(normalized))
    }

    /// Validates raw input without constructing a value.
    pub fn is_valid(raw: &str) -> bool {
        if raw.trim().is_empty() {
            return false;
        }
        Self::matches_patterns(&Self::normalize(raw))
    }

    /// Strips spaces, hyphens and parentheses and trims whitespace.
    pub fn normalize(raw: &str) -> String {
        normalize_phone_number(raw)
    }

    fn matches_patterns(normalized: &str) -> bool {
        // Cameroon first: it is the common case for this service
        if CAMEROON_REGEX.is_match(normalized) {
            return true;
        }
        INTERNATIONAL_REGEX.is_match(normalized)
    }

    /// The normalized phone number
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Key under which the outstanding OTP for this number is stored
    pub fn storage_key(&self) -> String {
        format!("{}:{}", STORAGE_KEY_PREFIX, self.0)
    }

    /// Key under which issuances for this number are counted
    pub fn issuance_key(&self) -> String {
        format!("{}:{}", ISSUANCE_KEY_PREFIX, self.0)
    }

    /// Log-safe rendering revealing only the first 4 characters
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}
