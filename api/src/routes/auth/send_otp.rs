use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::otp::validation_messages;
use crate::dto::{ErrorResponse, SendOtpRequest, SendOtpResponse};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/auth/send-otp
///
/// Issues a code for the phone number. The code is delivered out of band
/// and never appears in the response.
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+237612345678" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "OTP sent to +237612345678. Valid for 5 minutes.",
///     "expiresAt": "2025-01-01T10:05:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `{ "errors": [...] }` for a missing or malformed phone number
/// - 429 with `Retry-After` once the per-number issuance cap is hit
/// - 500 when the store is unavailable
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(validation_messages(&errors)));
    }

    match state.otp_service.issue(&request.phone_number).await {
        Ok(issued) => HttpResponse::Ok().json(SendOtpResponse::from(issued)),
        Err(error) => handle_domain_error(error),
    }
}
