//! Server error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Failed to parse config: {}", err))
    }
}

impl From<std::io::Error> for ConfigError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to read config file: {}", err))
    }
}

/// Why a table could not be looked up or opened.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RegistryError {
    /// Table ids are 1-64 characters of `[A-Za-z0-9_-]`.
    #[display("Invalid table id {_0:?}")]
    InvalidId(String),

    /// No table with this id is open.
    #[display("No table {_0:?}")]
    Unknown(String),

    /// Opening another table would exceed the configured limit and no open
    /// table is idle enough to close.
    #[display("Table limit of {max} reached")]
    Full {
        /// Configured maximum.
        max: usize,
    },
}

impl std::error::Error for RegistryError {}
