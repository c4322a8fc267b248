//! Health check endpoints

use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint: the backend must answer its health check
#[utoipa::path(
    get,
    path = "/ready",
    tag = "System",
    responses(
        (status = 200, description = "Backend reachable"),
        (status = 503, description = "Backend unreachable")
    )
)]
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.backend.health().await;
    if health.reachable {
        (StatusCode::OK, "ready")
    } else {
        tracing::warn!(
            status = ?health.status,
            latency_ms = health.latency_ms,
            "Backend not ready"
        );
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    }
}
