//! CLI error types

use pricer_models::functions::FunctionError;
use thiserror::Error;

/// Errors surfaced to the command line
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Malformed command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Function lookup, binding or validation failure
    #[error(transparent)]
    Function(#[from] FunctionError),

    /// Malformed CSV input or failed CSV output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Console or file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result alias
pub type Result<T> = std::result::Result<T, CliError>;
