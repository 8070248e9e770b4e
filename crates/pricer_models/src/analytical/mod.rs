//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form prices and Greeks under two lognormal
//! models:
//! - Black-Scholes-Merton on a spot asset with continuous dividend yield
//! - Black-76 on a forward or futures price
//!
//! Both models evaluate one shared lognormal kernel, so d₁/d₂ and the
//! normal distribution calls exist in exactly one place.
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports `f64` and `f32`
//! - **Validated construction**: Degenerate inputs are rejected up front;
//!   `new_unchecked` keeps silent NaN propagation available on request
//! - **Stateless**: A model value is its inputs; calls never interact

pub mod black76;
pub mod black_scholes_merton;
pub mod error;
pub mod greeks;
mod lognormal;
pub mod model;

// Re-export main types at module level
pub use black76::Black76;
pub use black_scholes_merton::{BlackScholesMerton, BlackScholesMertonBuilder};
pub use error::AnalyticalError;
pub use greeks::{Greeks, Measure};
pub use model::ClosedFormModel;
