//! REST API server for the optbook pricing functions
//!
//! This crate exposes every registered spreadsheet function over HTTP:
//! listing, single evaluation and parallel batches, plus health and
//! readiness checks.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export pricer dependencies for integration
pub use pricer_core;
pub use pricer_models;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
