//! Rolodex API Server Entry Point
//!
//! Bootstraps configuration, opens the contact store and starts the Axum
//! HTTP server. A store that cannot be opened stops the process.

use rolodex_api::telemetry::{init_tracing, TelemetryConfig};
use rolodex_api::{create_api_router, ApiConfig, ApiError, ApiResult, ContactService};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing(&TelemetryConfig::default())?;

    let config = ApiConfig::from_env()?;

    let service = ContactService::from_config(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to open contact store");
        ApiError::internal_error(format!("Failed to open contact store: {}", e))
    })?;

    let app = create_api_router(service, &config);

    let addr = config.bind_addr()?;
    tracing::info!(%addr, store = ?config.store, "Starting Rolodex API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C. In-flight requests are allowed to finish.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
