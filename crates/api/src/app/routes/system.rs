use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Unauthenticated liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
