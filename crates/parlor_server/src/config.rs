//! Server configuration.
//!
//! Loaded from an optional TOML file, then overridden by CLI flags and
//! environment variables.

use crate::cli::Cli;
use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Runtime configuration for the server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Tracing filter used when `RUST_LOG` is unset.
    log_filter: String,

    /// Maximum number of tables, including the default one.
    max_tables: usize,

    /// Per-table broadcast buffer.
    channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            log_filter: "info,parlor_server=debug".to_string(),
            max_tables: 64,
            channel_capacity: 16,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        info!(port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Builds the effective configuration: file (if any), then CLI/env overrides.
    #[instrument(skip(cli))]
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(host) = &cli.host {
            config.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(filter) = &cli.log_filter {
            config.log_filter = filter.clone();
        }
        if let Some(max) = cli.max_tables {
            config.max_tables = max;
        }
        if let Some(capacity) = cli.channel_capacity {
            config.channel_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tables == 0 {
            return Err(ConfigError::new("max_tables must be at least 1"));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::new("channel_capacity must be at least 1"));
        }
        Ok(())
    }
}
