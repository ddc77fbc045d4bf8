//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{StoreError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// Input-triggered failures (`Validation`, `RateLimited`) are ordinary
/// result values that the HTTP layer turns into 4xx responses.
/// `Configuration` only occurs while building services at startup.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    #[error("Too many OTP requests, retry in {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Validation error carrying a single message
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            errors: vec![message.into()],
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
