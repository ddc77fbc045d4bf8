//! Authentication route handlers
//!
//! OTP issuance and verification for phone-number sign-in.

pub mod send_otp;
pub mod verify_otp;

use actix_web::web;

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Mount the `/api/auth` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/send-otp", web::post().to(send_otp))
            .route("/verify-otp", web::post().to(verify_otp)),
    );
}
