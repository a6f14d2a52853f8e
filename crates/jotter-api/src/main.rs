//! jotter-api - HTTP API server for the jotter notes service.

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use jotter_api::{build_router, config::ServerConfig, telemetry, AppState};
use jotter_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let _file_guard = telemetry::init_tracing(&config.log);

    info!(
        subsystem = "api",
        version = env!("CARGO_PKG_VERSION"),
        "Starting jotter-api"
    );

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect_with_config(&config.database_url, config.pool_config()).await?;
    info!("Database connected");

    info!("Running database migrations...");
    db.migrate().await?;
    info!("Database migrations complete");

    let state = AppState::from_repository(Arc::new(db.notes.clone()));
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown signal received, closing database pool");
    db.close().await;
    info!("Server stopped");

    Ok(())
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
