pub mod otp_code;
pub mod phone_number;

pub use otp_code::{OtpCode, OtpLength, MAX_CODE_LENGTH, MIN_CODE_LENGTH};
pub use phone_number::PhoneNumber;
