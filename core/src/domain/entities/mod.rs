//! Domain entities representing core business objects.

pub mod otp_entry;
pub mod session;

// Re-export commonly used types
pub use otp_entry::OtpEntry;
pub use session::SessionClaims;
