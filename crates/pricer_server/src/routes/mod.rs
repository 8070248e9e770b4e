//! Route modules for the pricer server
//!
//! This module contains endpoint group-specific routers:
//! - functions: Spreadsheet function listing, evaluation and batches
//! - health: Health check and readiness endpoints

pub mod functions;
pub mod health;

use axum::Router;
use pricer_models::batch::BatchEvaluator;
use pricer_models::functions::FunctionRegistry;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Function registry configured with the server's policy
    pub registry: FunctionRegistry,
    /// Batch evaluator sharing the registry
    pub batch: BatchEvaluator,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let registry = FunctionRegistry::new(config.option_type_policy);
        let batch = BatchEvaluator::new(registry, config.batch_config());
        Self {
            config,
            registry,
            batch,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let state = AppState::new(config);

    Router::new()
        .merge(health::routes())
        .merge(functions::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
