//! OTP service module
//!
//! This module covers the one-time password lifecycle:
//! - Secure numeric code generation
//! - Issuance with a per-number rate limit
//! - Single-use verification with an attempt budget
//! - The storage and rate limiter seams implemented by `ilon_infra`

mod config;
pub mod generator;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::{OtpServiceConfig, MAX_ISSUANCE_WINDOW_SECONDS, MAX_TTL_SECONDS};
pub use service::{
    parse_phone, OtpService, INVALID_CODE_MESSAGE, INVALID_PHONE_MESSAGE, PHONE_REQUIRED_MESSAGE,
};
pub use traits::{OtpStoreTrait, RateLimiterTrait, StoreResult};
pub use types::{ConsumeOutcome, OtpIssued, OtpVerification, WindowUsage};
