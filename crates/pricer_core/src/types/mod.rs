//! Shared option and error types.
//!
//! This module provides:
//! - `option_type`: The closed call/put enumeration
//! - `error`: Structured error types for pricing and parsing
//!
//! # Re-exports
//!
//! - [`OptionType`] from `option_type`
//! - [`PricingError`], [`OptionTypeError`] from `error`

pub mod error;
pub mod option_type;

pub use error::{OptionTypeError, PricingError};
pub use option_type::OptionType;
