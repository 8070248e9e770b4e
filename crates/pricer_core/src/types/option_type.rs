//! European option type.
//!
//! A closed two-valued enumeration. Hosts pass the type as text, so
//! parsing is case-insensitive and anything other than "call" or "put"
//! is rejected.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::OptionType;
//!
//! let call: OptionType = "CALL".parse().unwrap();
//! assert_eq!(call, OptionType::Call);
//! assert!("straddle".parse::<OptionType>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::OptionTypeError;

/// Call or put.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at the strike.
    #[default]
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Both option types, calls first.
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// Canonical lowercase name as used by spreadsheet hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns true for puts.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }
}

impl FromStr for OptionType {
    type Err = OptionTypeError;

    fn from_str(s: &str) -> Result<Self, OptionTypeError> {
        if s.eq_ignore_ascii_case("call") {
            Ok(OptionType::Call)
        } else if s.eq_ignore_ascii_case("put") {
            Ok(OptionType::Put)
        } else {
            Err(OptionTypeError::Unknown(s.to_string()))
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
