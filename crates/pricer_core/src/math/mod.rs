//! Mathematical utilities shared by the pricing models.
//!
//! This module provides:
//! - `distributions`: Standard normal CDF and PDF, generic over `Float`

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};
