//! Health check endpoint

use std::time::Instant;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Shared state for the health endpoint
#[derive(Clone)]
pub struct HealthState {
    pub started_at: Instant,
}

/// Service status
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the service is running normally
    pub status: String,
    /// Crate version (from Cargo.toml)
    pub version: String,
    /// Seconds since the service started
    pub uptime_seconds: u64,
}

/// Service health check
///
/// Returns status, version and uptime. No auth required; use for
/// availability monitoring.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
