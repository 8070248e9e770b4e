//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands write their
//! results to the supplied writer; logs go to stderr.

pub mod batch;
pub mod eval;
pub mod functions;

/// Output format shared by `functions` and `batch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Comma-separated values
    Csv,
    /// JSON document
    Json,
}
