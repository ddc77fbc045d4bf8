//! OTP code value object.

use std::fmt;

use constant_time_eq::constant_time_eq;

use crate::errors::{DomainError, DomainResult};

/// Shortest code the service can be configured to issue
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code the service can be configured to issue
pub const MAX_CODE_LENGTH: usize = 10;

/// Code length used when nothing else is configured
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// A code length already checked against `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpLength(usize);

impl OtpLength {
    /// Validates a configured code length.
    ///
    /// Out-of-range values are a configuration error and should stop the
    /// service from starting.
    pub fn new(length: usize) -> DomainResult<Self> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(DomainError::Configuration {
                message: format!(
                    "OTP length must be between {} and {} digits, got {}",
                    MIN_CODE_LENGTH, MAX_CODE_LENGTH, length
                ),
            });
        }
        Ok(Self(length))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for OtpLength {
    fn default() -> Self {
        Self(DEFAULT_CODE_LENGTH)
    }
}

/// A one-time password.
///
/// Credential material: `Debug` is redacted so the code cannot leak through
/// `{:?}` in logs or error chains.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Wraps a code read back from a storage backend
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw digits. Never pass this to a log macro on a production path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares against a submitted code in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        if self.0.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtpCode({})", "*".repeat(self.0.len()))
    }
}
