//! Liveness, readiness and service metadata endpoints

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::app::AppState;

pub const APPLICATION_NAME: &str = "Ilon API";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check))
        .route("/health/ready", web::get().to(readiness_check));
}

/// Liveness: the process is up and serving requests
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "ilon-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Readiness: the OTP store answers
pub async fn readiness_check(state: web::Data<AppState>) -> HttpResponse {
    let store = state.otp_service.store();

    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ready",
            "store": store.backend_name(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, store = store.backend_name(), "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unavailable",
                "store": store.backend_name(),
            }))
        }
    }
}

/// Static service metadata
pub async fn service_info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "application": APPLICATION_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment.to_string(),
        "endpoints": {
            "health": "GET /health",
            "ready": "GET /health/ready",
            "sendOtp": "POST /api/auth/send-otp",
            "verifyOtp": "POST /api/auth/verify-otp",
        }
    }))
}
