// handlers/root.rs - service info and health probes
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "name": "Portfolio API",
            "version": env!("CARGO_PKG_VERSION"),
            "message": "Welcome to the Portfolio API"
        }
    }))
}

/// GET /health - 503 when the store cannot be reached
pub async fn health(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let store = state.stores.health.backend_tag();
    match state.stores.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": { "status": "ok", "store": store } })),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "message": "Store unavailable",
                    "code": "SERVICE_UNAVAILABLE"
                })),
            )
        }
    }
}
