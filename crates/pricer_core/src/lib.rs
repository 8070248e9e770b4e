//! # pricer_core: Numerical Foundation for optbook
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Standard normal CDF and PDF (`math::distributions`)
//! - The call/put enumeration (`types::option_type`)
//! - Error categories: `PricingError`, `OptionTypeError` (`types::error`)
//!
//! Layer 1 has no dependencies on other pricer_* crates.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::{norm_cdf, norm_pdf};
//! use pricer_core::types::OptionType;
//!
//! let put: OptionType = "Put".parse().unwrap();
//! assert!(put.is_put());
//!
//! let p = norm_cdf(1.0_f64) - norm_cdf(-1.0_f64);
//! assert!((p - 0.6827).abs() < 1e-4);
//! assert!(norm_pdf(0.0_f64) > norm_pdf(1.0_f64));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
