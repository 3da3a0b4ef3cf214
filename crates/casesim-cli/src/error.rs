//! Case simulator CLI: error types.

use casesim_core::error::CaseError;
use casesim_core::settings::ConfigError;
use thiserror::Error;

/// Errors that end a terminal run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong command-line usage.
    #[error("usage: {0}")]
    Usage(String),

    /// An environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The case could not be loaded.
    #[error(transparent)]
    Case(#[from] CaseError),

    /// Reading input or writing output failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
