//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Input validation failures of the closed-form models

use pricer_core::types::{OptionTypeError, PricingError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidOptionType`: Option type text other than "call"/"put"
/// - `InvalidSpot`: Non-positive spot price (BSM)
/// - `InvalidForward`: Non-positive forward price (Black-76)
/// - `InvalidStrike`: Non-positive strike
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `InvalidVolatility`: Non-positive volatility
/// - `NonFiniteInput`: NaN or infinite input
/// - `NumericalInstability`: Finite inputs produced a non-finite output
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: 0.0 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Option type outside {"call", "put"}.
    #[error("Invalid option type: '{value}' (expected 'call' or 'put')")]
    InvalidOptionType {
        /// The rejected text
        value: String,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid forward price (non-positive).
    #[error("Invalid forward price: F = {forward}")]
    InvalidForward {
        /// The invalid forward price value
        forward: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// An input was NaN or infinite.
    #[error("Non-finite input: {name}")]
    NonFiniteInput {
        /// Parameter name
        name: &'static str,
    },

    /// Finite inputs overflowed to an infinite or NaN output.
    #[error("Numerical instability: {function} is not finite")]
    NumericalInstability {
        /// Function whose output overflowed
        function: String,
    },
}

impl AnalyticalError {
    /// True for the argument-set failure, false for numeric domain failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AnalyticalError::InvalidOptionType { .. })
    }
}

impl From<OptionTypeError> for AnalyticalError {
    fn from(err: OptionTypeError) -> Self {
        match err {
            OptionTypeError::Unknown(value) => AnalyticalError::InvalidOptionType { value },
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ if err.is_invalid_argument() => PricingError::InvalidArgument(err.to_string()),
            _ => PricingError::DomainError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AnalyticalError::InvalidSpot { spot: -100.0 }.to_string(),
            "Invalid spot price: S = -100"
        );
        assert_eq!(
            AnalyticalError::InvalidExpiry { expiry: 0.0 }.to_string(),
            "Invalid expiry: T = 0"
        );
        assert_eq!(
            AnalyticalError::NonFiniteInput { name: "r" }.to_string(),
            "Non-finite input: r"
        );
        assert_eq!(
            AnalyticalError::InvalidOptionType {
                value: "both".to_string()
            }
            .to_string(),
            "Invalid option type: 'both' (expected 'call' or 'put')"
        );
    }

    #[test]
    fn test_from_option_type_error() {
        let err: AnalyticalError = OptionTypeError::Unknown("Puts".to_string()).into();
        assert_eq!(
            err,
            AnalyticalError::InvalidOptionType {
                value: "Puts".to_string()
            }
        );
    }

    #[test]
    fn test_option_type_maps_to_invalid_argument() {
        let err = AnalyticalError::InvalidOptionType {
            value: "x".to_string(),
        };
        assert!(matches!(
            PricingError::from(err),
            PricingError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_numeric_failures_map_to_domain_error() {
        let errors = [
            AnalyticalError::InvalidSpot { spot: 0.0 },
            AnalyticalError::InvalidForward { forward: -1.0 },
            AnalyticalError::InvalidStrike { strike: 0.0 },
            AnalyticalError::InvalidExpiry { expiry: 0.0 },
            AnalyticalError::InvalidVolatility { volatility: 0.0 },
            AnalyticalError::NonFiniteInput { name: "sigma" },
        ];
        for err in errors {
            assert!(!err.is_invalid_argument());
            assert!(matches!(
                PricingError::from(err),
                PricingError::DomainError(_)
            ));
        }
    }

    #[test]
    fn test_instability_maps_to_numerical_instability() {
        let err = AnalyticalError::NumericalInstability {
            function: "bsm".to_string(),
        };
        assert!(!err.is_invalid_argument());
        assert_eq!(err.to_string(), "Numerical instability: bsm is not finite");
        let pricing = PricingError::from(err);
        assert!(matches!(pricing, PricingError::NumericalInstability(_)));
        assert_eq!(pricing.kind(), "domain_error");
    }
}
