//! PharmExtract server binary
//!
//! Starts the HTTP server for document extraction.

use anyhow::Context;
use clap::Parser;
use pharmextract_server::{config::ServerConfig, start_server};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Structured extraction service for medical, financial, legal and
/// pharmaceutical documents
#[derive(Parser, Debug)]
#[command(name = "pharmextract")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "PHARMEXTRACT_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration file (e.g. 0.0.0.0:5000)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Result log file, overriding the configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gateway API key
    #[arg(long, env = "LANGEXTRACT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads the environment
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharmextract=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            tracing::info!("No config file specified, using defaults");
            ServerConfig::default()
        }
    };
    let config = config.with_overrides(cli.bind, cli.output, cli.api_key);

    start_server(config).await?;
    Ok(())
}
