//! HTTP route definitions.
//!
//! - [`products`] - product CRUD, search and stock checks
//! - `/health` - liveness plus a store round trip

pub mod products;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::warn;

use crate::AppState;

/// Every route the server answers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(products::router())
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.products.is_healthy().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        warn!("Health check failed: store unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}
