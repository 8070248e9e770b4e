//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Categorised errors from pricing operations
//! - `OptionTypeError`: Errors from option type parsing

use std::fmt;

/// Categorised pricing errors.
///
/// Every model-level error maps onto one of these categories so that
/// hosts can report failures without knowing the originating model.
///
/// # Variants
/// - `InvalidArgument`: An argument outside its closed set of values
/// - `DomainError`: A numeric input outside the model's domain
/// - `NumericalInstability`: Computation produced a non-finite value
/// - `UnsupportedFunction`: The requested function does not exist
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::DomainError("volatility must be positive".to_string());
/// assert_eq!(format!("{}", err), "Domain error: volatility must be positive");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Argument outside its allowed set (e.g. an unknown option type)
    InvalidArgument(String),

    /// Numeric input outside the model domain (e.g. non-positive strike)
    DomainError(String),

    /// Computation produced a non-finite value
    NumericalInstability(String),

    /// Function not known to the pricing library
    UnsupportedFunction(String),
}

impl PricingError {
    /// Stable machine-readable category reported to hosts.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidArgument(_) => "invalid_argument",
            PricingError::DomainError(_) | PricingError::NumericalInstability(_) => "domain_error",
            PricingError::UnsupportedFunction(_) => "unknown_function",
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PricingError::DomainError(msg) => write!(f, "Domain error: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::UnsupportedFunction(msg) => {
                write!(f, "Unsupported function: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Option type parsing errors.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionTypeError;
///
/// let err = OptionTypeError::Unknown("straddle".to_string());
/// assert_eq!(format!("{}", err), "Unknown option type: 'straddle' (expected 'call' or 'put')");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionTypeError {
    /// The string is neither "call" nor "put" in any casing.
    Unknown(String),
}

impl fmt::Display for OptionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionTypeError::Unknown(value) => write!(
                f,
                "Unknown option type: '{}' (expected 'call' or 'put')",
                value
            ),
        }
    }
}

impl std::error::Error for OptionTypeError {}

impl From<OptionTypeError> for PricingError {
    fn from(err: OptionTypeError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}
