//! Health check endpoint
//!
//! Unauthenticated liveness probe: `GET /health` → `{"ok": true}`.

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
