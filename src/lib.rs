//! # SimpleBot
//!
//! Backend for the SimpleBot remote-control website: robot login, the
//! streaming-client settings the browser needs, health probes and static
//! hosting of the compiled Leptos UI.
//!
//! The message protocol, connection phases and interaction session live in
//! [`simplebot_core`], shared with the UI and the CLI.
//!
//! ## Modules
//!
//! - [`api`]: HTTP server with Axum
//! - [`auth`]: Robot password check
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simplebot::{serve, AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::load_default();
//!     config.auth.password = Some("change-me".to_string());
//!
//!     serve(AppState::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;

pub use api::{build_router, serve, ApiError, AppState};
pub use auth::{AuthError, Authenticator};
pub use config::{
    generate_default_config, AuthConfig, Config, ConfigError, LoggingConfig, ServerConfig,
    StreamSettings,
};
