/// QR Service - HTTP Server
///
/// Renders URLs as QR codes and publishes them to object storage.
use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use anyhow::Context;
use qr_service::services::{build_store, ensure_bucket_ready, QrEncoder};
use qr_service::{handlers, middleware, AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!(env = %config.app.env, "Starting qr-service");

    let store = build_store(&config.storage).await;
    ensure_bucket_ready(store.as_ref())
        .await
        .context("Failed to prepare storage bucket")?;

    let encoder = Arc::new(QrEncoder::new(config.qr.options()));
    let state = web::Data::new(AppState::new(store, encoder));

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    let allowed_origins = config.cors.allowed_origins.clone();

    tracing::info!("HTTP server listening on {}", http_bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors(&allowed_origins))
            .wrap(actix_middleware::Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure_routes)
    })
    .bind(&http_bind_address)
    .with_context(|| format!("Failed to bind {http_bind_address}"))?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("qr-service shutting down");

    Ok(())
}
