//! Errors raised while binding host arguments to a function.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::analytical::AnalyticalError;

/// Function registry errors.
///
/// Binding failures (`TooManyArguments` through `TypeMismatch`) are
/// reported before any pricing happens; `Pricing` wraps a model
/// validation failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FunctionError {
    /// No function registered under this name.
    #[error("Unknown function: '{name}'")]
    UnknownFunction {
        /// Requested name
        name: String,
    },

    /// More positional arguments than parameters.
    #[error("{function} takes at most {expected} arguments, got {got}")]
    TooManyArguments {
        /// Function name
        function: String,
        /// Parameter count
        expected: usize,
        /// Supplied count
        got: usize,
    },

    /// A parameter without default was blank or absent.
    #[error("{function}: missing required argument '{param}'")]
    MissingArgument {
        /// Function name
        function: String,
        /// Parameter name
        param: &'static str,
    },

    /// Named argument that matches no parameter.
    #[error("{function}: unknown parameter '{param}'")]
    UnknownParameter {
        /// Function name
        function: String,
        /// Supplied name
        param: String,
    },

    /// A parameter was given both positionally and by name.
    #[error("{function}: argument '{param}' given more than once")]
    DuplicateArgument {
        /// Function name
        function: String,
        /// Parameter name
        param: &'static str,
    },

    /// Value of the wrong kind, e.g. text where a number is expected.
    #[error("{function}: argument '{param}' expects {expected}, got {got}")]
    TypeMismatch {
        /// Function name
        function: String,
        /// Parameter name
        param: &'static str,
        /// Expected kind
        expected: &'static str,
        /// Supplied kind
        got: &'static str,
    },

    /// Model validation failed.
    #[error(transparent)]
    Pricing(#[from] AnalyticalError),
}

impl FunctionError {
    /// Stable machine-readable category.
    pub fn kind(&self) -> &'static str {
        PricingError::from(self.clone()).kind()
    }
}

impl From<FunctionError> for PricingError {
    fn from(err: FunctionError) -> Self {
        match err {
            FunctionError::UnknownFunction { name } => PricingError::UnsupportedFunction(name),
            FunctionError::Pricing(inner) => inner.into(),
            other => PricingError::InvalidArgument(other.to_string()),
        }
    }
}
