//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::{DateTime, Utc};
use simplebot_core::StreamConfig;
use std::sync::Arc;
use std::time::Instant;

use crate::auth::Authenticator;
use crate::config::Config;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Login checker built from `[auth]`
    pub authenticator: Arc<Authenticator>,
    /// Streaming client settings served to the UI
    pub stream: Arc<StreamConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Wall-clock start, reported by `/health`
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            authenticator: Arc::new(Authenticator::new(&config.auth)),
            stream: Arc::new(config.stream.to_stream_config()),
            config: Arc::new(config),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Whether robot login can succeed
    pub fn login_configured(&self) -> bool {
        self.authenticator.is_configured()
    }
}
