//! Health Routes
//!
//! Health check endpoints for monitoring and container probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (login is configured)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 503 until a robot password is configured, since every login
/// would be refused.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.login_configured() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let login_configured = state.login_configured();

    Json(HealthResponse {
        status: if login_configured { "healthy" } else { "degraded" }.to_string(),
        login_configured,
        ui_served: state.config.server.static_dir.is_some(),
        uptime_seconds: state.uptime_seconds(),
        started_at: state.started_at,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
