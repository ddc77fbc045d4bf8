use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use ilon_api::app::{create_app, AppState};
use ilon_api::{config, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let mut app_config = config::load_config().context("loading configuration")?;
    telemetry::init_tracing(&app_config.logging).context("initialising tracing")?;

    tracing::info!(
        environment = %app_config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Ilon API server"
    );

    if app_config.jwt.is_using_default_secret() {
        tracing::warn!("Using the development JWT secret; set ILON__JWT__SECRET before deploying");
    }
    if app_config.otp.log_codes && !app_config.allows_code_logging() {
        tracing::warn!(
            environment = %app_config.environment,
            "otp.log_codes is ignored outside development"
        );
        app_config.otp.log_codes = false;
    }

    let backends = ilon_infra::build_backends(&app_config.cache)
        .await
        .context("initialising OTP storage")?;
    let state = web::Data::new(
        AppState::build(&app_config, backends).context("building OTP services")?,
    );

    let bind_address = app_config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let server_config = app_config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &server_config))
        .keep_alive(Duration::from_secs(app_config.server.keep_alive))
        .client_request_timeout(Duration::from_secs(app_config.server.request_timeout));
    if app_config.server.workers > 0 {
        server = server.workers(app_config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await
        .context("running HTTP server")?;

    tracing::info!("Server stopped");
    Ok(())
}
