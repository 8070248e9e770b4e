//! Parallel evaluation of many independent function calls.
//!
//! Every call is pure, so a batch is an order-preserving map over the
//! registry. Small batches run sequentially; above
//! [`BatchConfig::parallel_threshold`] the map runs on the rayon pool.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::functions::{FunctionError, FunctionRegistry, HostValue};

/// Default size above which a batch is evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// One spreadsheet-style call: function name plus its arguments.
///
/// # Examples
/// ```
/// use pricer_models::batch::FunctionCall;
///
/// let call = FunctionCall::new("bsm_vega", [100.0, 100.0, 1.0, 0.0, 0.0, 0.2]);
/// assert_eq!(call.args.len(), 6);
/// assert!(call.named.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCall {
    /// Function name, matched case-insensitively
    pub function: String,
    /// Positional arguments
    #[cfg_attr(feature = "serde", serde(default))]
    pub args: Vec<HostValue>,
    /// Named arguments
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub named: BTreeMap<String, HostValue>,
}

impl FunctionCall {
    /// Creates a call with positional arguments only.
    pub fn new<I, V>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<HostValue>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
            named: BTreeMap::new(),
        }
    }

    /// Adds a named argument.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }
}

/// Batch evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Batches with at least this many calls are evaluated in parallel
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Evaluates calls against a registry, one result per call, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchEvaluator {
    registry: FunctionRegistry,
    config: BatchConfig,
}

impl BatchEvaluator {
    /// Creates an evaluator.
    pub fn new(registry: FunctionRegistry, config: BatchConfig) -> Self {
        Self { registry, config }
    }

    /// Registry used for every call.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Evaluates every call. A failing call does not affect the others.
    pub fn evaluate(&self, calls: &[FunctionCall]) -> Vec<Result<f64, FunctionError>> {
        let parallel = calls.len() >= self.config.parallel_threshold.max(1);
        debug!(calls = calls.len(), parallel, "evaluating batch");

        if parallel {
            calls
                .par_iter()
                .map(|call| self.registry.evaluate_call(call))
                .collect()
        } else {
            calls
                .iter()
                .map(|call| self.registry.evaluate_call(call))
                .collect()
        }
    }
}
