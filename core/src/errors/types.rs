//! Error types for the storage seam and session tokens

use thiserror::Error;

/// Failures reported by an OTP store or rate limiter backend
///
/// These are transient infrastructure failures. The services surface them
/// as internal errors and never retry: retrying an issuance would mint a
/// second code.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Corrupt store entry under {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Session token errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,
}
