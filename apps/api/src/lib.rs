//! # Stockroom API
//!
//! JSON/HTTP server for the product inventory.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Client ───► axum Router ───► ProductService ───► dyn ProductStore     │
//! │              (TraceLayer)     (business rules)     ├── SQLite          │
//! │                                                    └── in-memory       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default 8080)
//! - `BIND_ADDR` - listen interface (default 0.0.0.0)
//! - `DATABASE_PATH` - SQLite file (default ./stockroom.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default 5)
//! - `STORE_BACKEND` - `sqlite` or `memory` (default sqlite)
//! - `LOG_FILTER` - tracing filter, overridden by `RUST_LOG`

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::services::ProductService;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    pub fn new(products: ProductService) -> Self {
        AppState { products }
    }
}

/// Builds the full HTTP application.
pub fn build_router(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
