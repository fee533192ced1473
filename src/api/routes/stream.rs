//! Stream Configuration Route
//!
//! - GET /api/stream-config - Settings for the browser's streaming client

use axum::{extract::State, Json};
use simplebot_core::StreamConfig;
use std::sync::Arc;

use crate::api::state::AppState;

/// GET /api/stream-config
pub async fn stream_config(State(state): State<Arc<AppState>>) -> Json<StreamConfig> {
    Json(state.stream.as_ref().clone())
}
