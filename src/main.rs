// ABOUTME: Entry point for tutor: a terminal chat widget for the Robotics Tutor ask action.
// ABOUTME: Parses CLI args, sets up file logging, loads config, and launches the app.

use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use robotutor::app::App;
use robotutor::ask::create_action;
use robotutor::config::{Config, Overrides};

#[derive(Debug, Parser)]
#[command(name = "tutor", version, about = "Ask the Robotics Tutor from your terminal")]
struct Cli {
    /// Config file to use instead of ~/.robotutor/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ask provider: convex or echo.
    #[arg(long)]
    provider: Option<String>,

    /// Convex deployment URL, e.g. https://happy-otter-123.convex.cloud.
    #[arg(long)]
    url: Option<String>,

    /// Action path on the deployment, e.g. chat:askRobotics.
    #[arg(long)]
    action: Option<String>,

    /// Start with the widget open.
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load local .env if present (auth token, RUST_LOG).
    let _ = dotenvy::dotenv();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply(Overrides {
        provider: cli.provider,
        deployment_url: cli.url,
        action: cli.action,
        open: cli.open,
    });

    if let Err(e) = init_logging(&config) {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let action = create_action(&config.ask)?;
    App::new(config, action).run().await
}

/// Send tracing output to the log file; the terminal belongs to the TUI.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = config.log_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
