//! Command-line interface for the parlor server.

use clap::Parser;
use std::path::PathBuf;

/// Parlor - two-player tic-tac-toe server with live browser updates
///
/// Values given here override the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "parlor")]
#[command(about = "Authoritative tic-tac-toe server for two browser players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "PARLOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "PARLOR_HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, env = "PARLOR_LOG")]
    pub log_filter: Option<String>,

    /// Maximum number of concurrent tables, including the default one
    #[arg(long)]
    pub max_tables: Option<usize>,

    /// Buffered updates per table before slow clients skip ahead
    #[arg(long)]
    pub channel_capacity: Option<usize>,
}
