//! Spreadsheet-callable function surface.
//!
//! Each closed-form price and Greek is registered under its workbook name
//! (`bsm`, `bsm_delta`, ..., `black76_volga`) with the workbook's
//! positional signature and defaults. Hosts pass [`HostValue`]s and get a
//! bare `f64` back.
//!
//! - [`FunctionId`], [`ParamSpec`]: names and signatures
//! - [`FunctionRegistry`]: argument binding and evaluation
//! - [`OptionTypePolicy`]: strict validation or legacy quirks
//! - [`FunctionError`]: binding and validation failures

pub mod error;
pub mod registry;
pub mod signature;
pub mod value;

pub use error::FunctionError;
pub use registry::{FunctionRegistry, OptionTypePolicy};
pub use signature::{FunctionId, Model, ParamDefault, ParamSpec};
pub use value::HostValue;
