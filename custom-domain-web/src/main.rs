//! Custom domain provisioner HTTP server

use std::process::ExitCode;

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use custom_domain_app::config::AppConfig;
use custom_domain_app::{AppState, LogFormat};
use custom_domain_web::{configure, request_span, telemetry};

#[actix_web::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let _guard = telemetry::init(LogFormat::Text, None);
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = telemetry::init(config.log_format, config.log_dir.as_deref());

    if let Err(e) = run(config).await {
        tracing::error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting custom domain provisioner");
    tracing::info!("Configuration: {config:?}");

    let state = web::Data::new(
        AppState::from_config(&config).context("Failed to initialize services")?,
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(request_span))
            .configure(configure)
    })
    .bind(config.bind_address.as_str())
    .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    tracing::info!("Listening on {}", config.bind_address);
    server.run().await.context("Server terminated with an error")
}
