//! Login Route
//!
//! - POST /api/login - Check the robot password and hand back the stream URL

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use simplebot_core::{LoginRequest, LoginResponse};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/login
///
/// Blank fields give 400, a wrong password 401 and an unset password 503.
/// Error bodies carry the text the login form shows in `message`.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let body = state.authenticator.verify(&request)?;
    Ok(Json(body))
}
