//! Parlor server library - authoritative tic-tac-toe over HTTP and WebSocket
//!
//! The server owns every game. Browsers submit moves through polling
//! endpoints or the push channel, and every connected client of a table is
//! sent the new board and turn after each accepted change.
//!
//! # Architecture
//!
//! - **Table**: one shared [`GameState`](parlor_tictactoe::GameState) plus an update channel
//! - **Registry**: table id to table mapping; the unprefixed routes use `default`
//! - **Routes**: JSON endpoints mirroring the classic `/board`, `/turn`, `/move` API
//! - **Socket**: WebSocket push of `board` / `turn` / `status` events
//!
//! # Example
//!
//! ```no_run
//! use parlor_server::{ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod client;
mod config;
mod error;
mod events;
mod registry;
mod routes;
mod socket;
mod table;

pub use cli::Cli;
pub use config::ServerConfig;
pub use error::{ConfigError, RegistryError};
pub use events::{Ack, Action, ClientCommand, ServerEvent};
pub use registry::{DEFAULT_TABLE, Registry};
pub use routes::{OpenedTable, SelectedTable, router};
pub use socket::handle_command;
pub use table::{Table, TableId};

use anyhow::Context;
use tracing::info;

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let registry = Registry::from_config(&config);
    let app = router(registry);

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening for new connections on http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
