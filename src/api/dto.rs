//! Data Transfer Objects
//!
//! Response types owned by the server. The login and stream-config bodies
//! are shared with the UI and live in `simplebot_core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Whether a robot password is set
    pub login_configured: bool,
    /// Whether a compiled UI is being served
    pub ui_served: bool,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub version: String,
}
