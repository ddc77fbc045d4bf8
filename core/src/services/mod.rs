//! Business services containing domain logic and use cases.

pub mod otp;
pub mod token;

// Re-export commonly used types
pub use otp::{
    ConsumeOutcome, OtpIssued, OtpService, OtpServiceConfig, OtpStoreTrait, OtpVerification,
    RateLimiterTrait, StoreResult, WindowUsage,
};
pub use token::SessionTokenService;
