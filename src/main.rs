//! SimpleBot Server
//!
//! Run with: cargo run --bin simplebot -- --static-dir simplebot-ui/dist
//!
//! # Configuration
//!
//! Settings come from the first config file found (`--config`, then
//! `~/.config/simplebot/config.toml`, `/etc/simplebot/config.toml`,
//! `./config.toml`), then `SIMPLEBOT_*` environment variables, then the
//! flags below. `RUST_LOG` overrides the configured log level.

use clap::Parser;
use simplebot::api::{serve, AppState};
use simplebot::config::{Config, LoggingConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "simplebot")]
#[command(author, version, about = "SimpleBot remote-control web server", long_about = None)]
struct Args {
    /// Config file path (default: $SIMPLEBOT_CONFIG, then the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory with the compiled web UI
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = config_path(args.config.clone(), std::env::var_os("SIMPLEBOT_CONFIG"));
    let mut config = match &config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.static_dir {
        config.server.static_dir = Some(dir);
    }

    init_logging(&config.logging);

    tracing::info!("Starting SimpleBot server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        device_uid = %config.stream.device_uid,
        signaling_port = config.stream.signaling_port,
        "Streaming client settings"
    );

    let state = AppState::new(config);
    if !state.login_configured() {
        tracing::warn!("No robot password configured; set SIMPLEBOT_PASSWORD to allow logins");
    }

    serve(state).await?;

    tracing::info!("SimpleBot server stopped");
    Ok(())
}

/// Initialize tracing from the logging section
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter_directive().into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// The `--config` flag wins over `SIMPLEBOT_CONFIG`; an empty variable counts as unset
fn config_path(flag: Option<PathBuf>, env: Option<std::ffi::OsString>) -> Option<PathBuf> {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["simplebot", "--port", "8080", "-c", "bot.toml"]).unwrap();
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.config, Some(PathBuf::from("bot.toml")));
    }

    #[test]
    fn test_config_path_precedence() {
        assert_eq!(
            config_path(Some("a.toml".into()), Some("b.toml".into())),
            Some(PathBuf::from("a.toml"))
        );
        assert_eq!(
            config_path(None, Some("b.toml".into())),
            Some(PathBuf::from("b.toml"))
        );
        assert_eq!(config_path(None, Some("".into())), None);
        assert_eq!(config_path(None, None), None);
    }
}
