//! Application state and factory
//!
//! This module wires the OTP service into shared state and builds the
//! Actix-web application around it.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use ilon_core::errors::DomainResult;
use ilon_core::services::otp::{OtpService, OtpServiceConfig};
use ilon_core::services::SessionTokenService;
use ilon_infra::OtpBackends;
use ilon_shared::{AppConfig, Environment};

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::create_cors;
use crate::routes;

/// Application state that holds shared services
pub struct AppState {
    pub otp_service: Arc<OtpService>,
    pub environment: Environment,
}

impl AppState {
    /// Build the services from configuration and storage backends.
    ///
    /// Fails on invalid OTP or JWT settings so misconfiguration stops
    /// startup instead of surfacing on the first request.
    pub fn build(config: &AppConfig, backends: OtpBackends) -> DomainResult<Self> {
        let otp_config = OtpServiceConfig::from_config(&config.otp, config.allows_code_logging())?;
        let tokens = SessionTokenService::new(&config.jwt)?;

        let otp_service = OtpService::new(
            backends.store,
            backends.limiter,
            Arc::new(tokens),
            otp_config,
        );

        Ok(Self {
            otp_service: Arc::new(otp_service),
            environment: config.environment,
        })
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(json_config)
        // Middleware runs bottom-up: CORS first, then the request span
        .wrap(TracingLogger::default())
        .wrap(create_cors(&config.cors))
        .configure(routes::health::configure)
        .configure(routes::auth::configure)
        .default_service(web::route().to(not_found))
}
