//! # Pricer Models (L2: Pricing Engine)
//!
//! Closed-form European option prices and Greeks, exposed as
//! spreadsheet-callable functions.
//!
//! This crate provides:
//! - Black-Scholes-Merton (spot, dividend yield) and Black-76 (forward)
//!   models sharing one lognormal kernel
//! - A [`Greeks`](analytical::Greeks) bundle computed from a single d₁/d₂
//!   evaluation
//! - A function registry binding loosely typed host arguments to the
//!   sixteen workbook functions
//! - Order-preserving parallel batch evaluation
//!
//! ## Design Principles
//!
//! - **Stateless**: every call is a pure function of its inputs
//! - **Generic numerics**: models are generic over `num_traits::Float`
//! - **Validated by default**: degenerate inputs are errors unless the
//!   legacy policy is selected explicitly

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod batch;
pub mod functions;
