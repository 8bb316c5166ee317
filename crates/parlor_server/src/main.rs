//! Parlor - two-player tic-tac-toe server

use anyhow::Result;
use clap::Parser;
use parlor_server::{Cli, ServerConfig, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ServerConfig::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    info!(host = %config.host(), port = config.port(), "Starting parlor server");
    serve(config).await
}
