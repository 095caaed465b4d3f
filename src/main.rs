//! launchlist server entry point.
//!
//! Starts the Axum HTTP server: the waitlist REST endpoint plus the static
//! landing page.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use launchlist::api;
use launchlist::app_state::AppState;
use launchlist::config::AppConfig;
use launchlist::persistence::{FileStore, MongoStore};
use launchlist::service::WaitlistService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(addr = %config.listen_addr, "starting launchlist");

    // Build persistence layer
    let mongo = config.mongodb_uri.clone().map(|uri| {
        MongoStore::new(
            uri,
            config.mongodb_db.clone(),
            config.mongodb_collection.clone(),
        )
    });
    if mongo.is_none() {
        tracing::info!(path = %config.data_file.display(), "no MONGODB_URI set, using file backend only");
    }
    let file = FileStore::new(config.data_file.clone());

    // Build service and application state
    let waitlist = Arc::new(WaitlistService::new(mongo, file));
    let app_state = AppState {
        waitlist: Arc::clone(&waitlist),
    };

    // Build router: REST endpoints plus the static landing page as fallback
    let app = Router::new()
        .merge(api::build_router())
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the cached document-store connection, if one was opened.
    waitlist.shutdown().await;
    tracing::info!("shutdown complete");

    Ok(())
}

/// Resolves when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
