//! Session token module
//!
//! Signs and validates the HS256 JWT handed out after a successful OTP
//! verification.

mod service;


pub use service::{SessionTokenService, MAX_SESSION_EXPIRY_SECONDS};
