//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use simplebot_core::{IpcMode, StreamConfig};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub stream: StreamSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Directory holding the compiled web UI (trunk's `dist/`)
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Login configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared robot password; login is refused while unset
    #[serde(default)]
    pub password: Option<String>,

    /// Video stream URL handed to the interaction page after login
    #[serde(default)]
    pub stream_url: Option<String>,
}

/// Streaming client settings served to the web UI
#[derive(Debug, Clone, Deserialize)]
pub struct StreamSettings {
    #[serde(default = "default_device_uid")]
    pub device_uid: String,

    #[serde(default = "default_signaling_path")]
    pub signaling_path: String,

    #[serde(default = "default_signaling_port")]
    pub signaling_port: u16,

    #[serde(default = "default_ipc_mode")]
    pub ipc_mode: IpcMode,

    #[serde(default)]
    pub datachannel_only: bool,
}

fn default_device_uid() -> String {
    StreamConfig::default().device_uid
}

fn default_signaling_path() -> String {
    StreamConfig::default().signaling_path
}

fn default_signaling_port() -> u16 {
    StreamConfig::default().signaling_port
}

fn default_ipc_mode() -> IpcMode {
    IpcMode::Reliable
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            device_uid: default_device_uid(),
            signaling_path: default_signaling_path(),
            signaling_port: default_signaling_port(),
            ipc_mode: default_ipc_mode(),
            datachannel_only: false,
        }
    }
}

impl StreamSettings {
    pub fn to_stream_config(&self) -> StreamConfig {
        StreamConfig {
            device_uid: self.device_uid.clone(),
            signaling_path: self.signaling_path.clone(),
            signaling_port: self.signaling_port,
            ipc_mode: self.ipc_mode,
            datachannel_only: self.datachannel_only,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> String {
        format!("simplebot={0},simplebot_core={0},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("simplebot").join("config.toml")),
            Some(PathBuf::from("/etc/simplebot/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(host) = lookup("SIMPLEBOT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SIMPLEBOT_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(dir) = lookup("SIMPLEBOT_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }

        // Auth overrides
        if let Some(password) = lookup("SIMPLEBOT_PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(url) = lookup("SIMPLEBOT_STREAM_URL") {
            self.auth.stream_url = Some(url);
        }

        // Stream overrides
        if let Some(uid) = lookup("SIMPLEBOT_DEVICE_UID") {
            self.stream.device_uid = uid;
        }

        // Logging overrides
        if let Some(level) = lookup("SIMPLEBOT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SIMPLEBOT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# SimpleBot Configuration
#
# Environment variables override these settings:
# - SIMPLEBOT_HOST
# - SIMPLEBOT_PORT
# - SIMPLEBOT_STATIC_DIR
# - SIMPLEBOT_PASSWORD
# - SIMPLEBOT_STREAM_URL
# - SIMPLEBOT_DEVICE_UID
# - SIMPLEBOT_LOG_LEVEL
# - SIMPLEBOT_LOG_FORMAT

[server]
# HTTP server host
host = "0.0.0.0"

# HTTP server port
port = 5000

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

# Compiled web UI to serve (trunk build output)
# static_dir = "simplebot-ui/dist"

[auth]
# Shared robot password. Login is refused until this is set.
# password = "change-me"

# Video stream URL handed to the interaction page after login
# stream_url = "https://robot.local:8443/stream"

[stream]
# Device the robot registers under on the signaling broker
device_uid = "Mekk"

# MQTT-over-WebSocket endpoint on the page's own host
signaling_path = "/mqtt"
signaling_port = 8443

# Data channel delivery: reliable or lossy
ipc_mode = "reliable"

# Skip the video track
datachannel_only = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
