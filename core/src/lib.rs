//! # Ilon Core
//!
//! Core business logic and domain layer for the Ilon backend.
//! This crate contains the OTP lifecycle: phone number value objects,
//! code generation, the storage seam, issuance and verification services,
//! and the session token issued after a successful verification.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
