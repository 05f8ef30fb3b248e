//! # Stockroom API Server
//!
//! Boots logging, the store and the HTTP listener.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::load() ──► tracing subscriber ──► store backend            │
//! │                                                   │                     │
//! │                       ┌───────────────────────────┴──────┐              │
//! │                       ▼                                  ▼              │
//! │              SQLite (Database::new,            InMemoryProductStore    │
//! │                 migrations)                                             │
//! │                       │                                  │              │
//! │                       └──────────────┬───────────────────┘              │
//! │                                      ▼                                  │
//! │                     axum::serve(..).with_graceful_shutdown             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockroom_api::config::{ApiConfig, StoreBackend};
use stockroom_api::services::ProductService;
use stockroom_api::{build_router, AppState};
use stockroom_db::{Database, InMemoryProductStore, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ApiConfig::load()?;

    // Initialize tracing; RUST_LOG wins over the configured default
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Stockroom API server...");
    info!(
        port = config.http_port,
        backend = ?config.store_backend,
        "Configuration loaded"
    );

    // Pick the store
    let mut database = None;
    let store: Arc<dyn ProductStore> = match config.store_backend {
        StoreBackend::Sqlite => {
            let db = Database::new(config.db_config()).await?;
            let (total, applied) = db.migration_status().await?;
            info!(
                path = %config.database_path.display(),
                migrations_applied = applied,
                migrations_total = total,
                "Connected to SQLite"
            );

            let store: Arc<dyn ProductStore> = Arc::new(db.products());
            database = Some(db);
            store
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on shutdown");
            Arc::new(InMemoryProductStore::new())
        }
    };

    let state = AppState::new(ProductService::new(store));
    let app = build_router(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening for HTTP requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = database {
        db.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// A handler that fails to install never fires; the other one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
