use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::otp::validation_messages;
use crate::dto::{ErrorResponse, VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/auth/verify-otp
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+237612345678", "otp": "482913" }
/// ```
///
/// # Response
///
/// Always 200 once the phone number is valid. A wrong, expired, reused or
/// never-issued code gives the same body:
/// ```json
/// { "isValid": false, "token": null, "error": "Invalid or expired code" }
/// ```
/// A correct code consumes it and returns a session token:
/// ```json
/// { "isValid": true, "token": "eyJ..." }
/// ```
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(validation_messages(&errors)));
    }

    match state
        .otp_service
        .verify(&request.phone_number, &request.otp)
        .await
    {
        Ok(verification) => HttpResponse::Ok().json(VerifyOtpResponse::from(verification)),
        Err(error) => handle_domain_error(error),
    }
}
