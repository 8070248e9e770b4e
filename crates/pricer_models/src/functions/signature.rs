//! Spreadsheet function identities and their parameter signatures.
//!
//! Every function is named `<model>[_<greek>]`: `bsm`, `bsm_delta`, ...,
//! `black76`, `black76_volga`. Sixteen in total.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::OptionType;

use super::error::FunctionError;
use crate::analytical::black_scholes_merton::{
    DEFAULT_DIVIDEND_YIELD, DEFAULT_EXPIRY, DEFAULT_RATE, DEFAULT_VOLATILITY,
};
use crate::analytical::Measure;

/// Pricing model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Model {
    /// Black-Scholes-Merton on spot
    Bsm,
    /// Black-76 on forward
    Black76,
}

impl Model {
    /// Function name prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Model::Bsm => "bsm",
            Model::Black76 => "black76",
        }
    }
}

/// Default applied when an argument is blank or omitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    /// No default; the caller must supply a value.
    Required,
    /// Numeric default.
    Number(f64),
    /// Option type default.
    OptionType(OptionType),
}

/// One positional parameter of a spreadsheet function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Name as shown to the host (`S`, `K`, `T`, `r`, `q`, `sigma`, `CP`).
    pub name: &'static str,
    /// Default value.
    pub default: ParamDefault,
}

impl ParamSpec {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            default: ParamDefault::Required,
        }
    }

    const fn number(name: &'static str, value: f64) -> Self {
        Self {
            name,
            default: ParamDefault::Number(value),
        }
    }

    /// True if the host may leave this parameter blank.
    pub fn is_optional(&self) -> bool {
        !matches!(self.default, ParamDefault::Required)
    }
}

const BSM_PARAMS: [ParamSpec; 7] = [
    ParamSpec::required("S"),
    ParamSpec::required("K"),
    ParamSpec::number("T", DEFAULT_EXPIRY),
    ParamSpec::number("r", DEFAULT_RATE),
    ParamSpec::number("q", DEFAULT_DIVIDEND_YIELD),
    ParamSpec::number("sigma", DEFAULT_VOLATILITY),
    ParamSpec {
        name: "CP",
        default: ParamDefault::OptionType(OptionType::Call),
    },
];

const BLACK76_PARAMS: [ParamSpec; 6] = [
    ParamSpec::required("F"),
    ParamSpec::required("K"),
    ParamSpec::required("T"),
    ParamSpec::required("r"),
    ParamSpec::required("sigma"),
    ParamSpec::required("CP"),
];

/// Identity of one registered spreadsheet function.
///
/// # Examples
/// ```
/// use pricer_models::functions::{FunctionId, Model};
/// use pricer_models::analytical::Measure;
///
/// let id: FunctionId = "BSM_Vega".parse().unwrap();
/// assert_eq!(id, FunctionId::new(Model::Bsm, Measure::Vega));
/// assert_eq!(id.to_string(), "bsm_vega");
/// assert_eq!(id.params().len(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId {
    model: Model,
    measure: Measure,
}

impl FunctionId {
    /// Creates an identity from its parts.
    pub const fn new(model: Model, measure: Measure) -> Self {
        Self { model, measure }
    }

    /// All registered functions: BSM first, price before Greeks.
    pub fn all() -> impl Iterator<Item = FunctionId> {
        [Model::Bsm, Model::Black76].into_iter().flat_map(|model| {
            Measure::ALL
                .into_iter()
                .map(move |measure| FunctionId::new(model, measure))
        })
    }

    /// Model family.
    pub fn model(&self) -> Model {
        self.model
    }

    /// Price or Greek computed.
    pub fn measure(&self) -> Measure {
        self.measure
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Ordered parameters; `CP` is present only for price, delta, theta
    /// and rho.
    pub fn params(&self) -> &'static [ParamSpec] {
        let all: &'static [ParamSpec] = match self.model {
            Model::Bsm => &BSM_PARAMS,
            Model::Black76 => &BLACK76_PARAMS,
        };
        if self.measure.takes_option_type() {
            all
        } else {
            &all[..all.len() - 1]
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.measure {
            Measure::Price => f.write_str(self.model.prefix()),
            measure => write!(f, "{}_{}", self.model.prefix(), measure),
        }
    }
}

impl FromStr for FunctionId {
    type Err = FunctionError;

    fn from_str(s: &str) -> Result<Self, FunctionError> {
        let unknown = || FunctionError::UnknownFunction {
            name: s.to_string(),
        };
        let lower = s.trim().to_ascii_lowercase();

        let (model, rest) = [Model::Bsm, Model::Black76]
            .into_iter()
            .find_map(|model| lower.strip_prefix(model.prefix()).map(|rest| (model, rest)))
            .ok_or_else(unknown)?;

        let measure = match rest {
            "" => Measure::Price,
            suffix => match suffix.strip_prefix('_') {
                Some(name) if name != "price" => {
                    name.parse::<Measure>().map_err(|_| unknown())?
                }
                _ => return Err(unknown()),
            },
        };
        Ok(FunctionId::new(model, measure))
    }
}
