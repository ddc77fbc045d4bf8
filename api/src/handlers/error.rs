use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::header,
    HttpRequest, HttpResponse,
};

use ilon_core::errors::DomainError;

use crate::dto::ErrorResponse;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Convert a domain error into the HTTP response the client sees.
///
/// Client errors carry their messages through. Everything else is logged
/// and collapsed into a generic 500 so backend details never leak.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { errors } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(errors))
        }
        DomainError::RateLimited { retry_after_seconds } => HttpResponse::TooManyRequests()
            .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
            .json(ErrorResponse::single(format!(
                "Too many OTP requests. Try again in {} seconds.",
                retry_after_seconds
            ))),
        other => {
            tracing::error!(error = %other, event = "request_failed", "Request failed");
            HttpResponse::InternalServerError().json(ErrorResponse::single(INTERNAL_ERROR_MESSAGE))
        }
    }
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body too large".to_string()
        }
        other => format!("Invalid request body: {}", other),
    };
    let response = HttpResponse::BadRequest().json(ErrorResponse::single(message));
    InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::single("Not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};
    use ilon_core::errors::StoreError;

    async fn body_of(response: HttpResponse) -> ErrorResponse {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn test_validation_maps_to_bad_request() {
        let response = handle_domain_error(DomainError::validation("Phone number is required"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.errors, vec!["Phone number is required"]);
    }

    #[actix_rt::test]
    async fn test_rate_limited_sets_retry_after() {
        let response = handle_domain_error(DomainError::RateLimited { retry_after_seconds: 42 });
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");
    }

    #[actix_rt::test]
    async fn test_storage_error_is_hidden() {
        let error = DomainError::from(StoreError::Backend("redis://secret-host down".to_string()));
        let response = handle_domain_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.errors, vec![INTERNAL_ERROR_MESSAGE]);
    }
}
