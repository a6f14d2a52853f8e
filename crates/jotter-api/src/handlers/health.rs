//! Liveness endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

use crate::AppState;

/// 200 when the store answers a ping, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            warn!(
                subsystem = "api",
                component = "health",
                error = %e,
                "Store ping failed"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "degraded",
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}
