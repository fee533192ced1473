//! SimpleBot CLI
//!
//! Command-line tool for operating and debugging a SimpleBot deployment:
//! - Try a robot login against a running server
//! - Decode robot data-channel payloads
//! - Print the JSON the web UI sends for a command
//! - Check server health
//! - Generate a config file

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use simplebot_core::{
    decode_batch, format_time, submit_login, Clock, Command, Direction, Inbound, LoginBackend,
    LoginError, LoginForm, LoginReply, LoginRequest, LoginResponse, Mode, SystemClock, LOGIN_PATH,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simplebot-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator tool for the SimpleBot remote-control website")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to the robot and print the stream handoff
    Login {
        #[arg(short, long)]
        name: String,
        /// Robot password (default: $SIMPLEBOT_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Decode a newline-separated batch of robot messages
    Decode {
        /// Payload text (default: read stdin)
        payload: Option<String>,
    },

    /// Print the JSON for an outbound command
    Encode {
        #[command(subcommand)]
        command: EncodeCommand,
    },

    /// Show server health
    Health,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum EncodeCommand {
    /// Drive command: front, back, left, right
    Motor { direction: Direction },
    /// Ask the robot to look for something
    Find { text: Vec<String> },
    /// Exploration mode: manual or autonomous
    Mode { mode: Mode },
}

/// Login over reqwest, sharing validation with the web UI
struct HttpLogin {
    client: reqwest::Client,
    url: String,
}

#[async_trait(?Send)]
impl LoginBackend for HttpLogin {
    async fn post_login(&self, request: &LoginRequest) -> Result<LoginReply, LoginError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Login request failed: {}", e);
                LoginError::Unreachable
            })?;

        let ok = response.status().is_success();
        let body = response.json::<LoginResponse>().await.ok();
        Ok(LoginReply { ok, body })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let json = cli.format == "json";

    match cli.command {
        Commands::Login { name, password } => {
            let password = resolve_password(password, std::env::var("SIMPLEBOT_PASSWORD").ok());
            let backend = HttpLogin {
                client,
                url: format!("{}{}", cli.api_url.trim_end_matches('/'), LOGIN_PATH),
            };

            match submit_login(&backend, &LoginForm::new(name, password)).await {
                Ok(handoff) => {
                    if json {
                        let body = LoginResponse {
                            stream_url: handoff.stream_url,
                            name: Some(handoff.name),
                            message: None,
                        };
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    } else {
                        println!("Logged in as {}", handoff.name);
                        println!(
                            "Stream URL: {}",
                            handoff.stream_url.as_deref().unwrap_or("(none configured)")
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Login failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Decode { payload } => {
            let payload = match payload {
                Some(p) => p,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let results = decode_batch(&payload);
            let mut rejected = 0;
            for result in &results {
                match result {
                    Ok(message) => println!("{}", describe(message)),
                    Err(e) => {
                        rejected += 1;
                        println!("rejected: {}", e);
                    }
                }
            }

            println!();
            println!(
                "{} message(s), {} applied, {} rejected",
                results.len(),
                results.len() - rejected,
                rejected
            );
        }

        Commands::Encode { command } => {
            let command = match command {
                EncodeCommand::Motor { direction } => Command::Motor(direction),
                EncodeCommand::Find { text } => {
                    let text = text.join(" ");
                    if text.trim().is_empty() {
                        eprintln!("Type a command for the robot first");
                        std::process::exit(1);
                    }
                    Command::Find(text)
                }
                EncodeCommand::Mode { mode } => Command::Mode(mode),
            };
            println!("{}", command.encode());
        }

        Commands::Health => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    if json {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!(
                        "SimpleBot v{}",
                        health["version"].as_str().unwrap_or("unknown")
                    );
                    println!();
                    println!(
                        "Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Login configured: {}",
                        health["login_configured"].as_bool().unwrap_or(false)
                    );
                    println!(
                        "Serving web UI: {}",
                        health["ui_served"].as_bool().unwrap_or(false)
                    );
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Server returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to SimpleBot at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin simplebot");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = simplebot::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// One line per decoded message, stamped like the robot log panel
fn describe(message: &Inbound) -> String {
    let at = format_time(SystemClock.now());
    match message {
        Inbound::Objects(names) => format!("{} - objects: {}", at, names.join(", ")),
        Inbound::Log(text) => format!("{} - log: {}", at, text),
        Inbound::Mode(mode) => format!("{} - mode: {}", at, mode),
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

/// `--password` wins over `SIMPLEBOT_PASSWORD`; missing both leaves it blank
/// so the shared form validation reports it
fn resolve_password(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env).unwrap_or_default()
}
