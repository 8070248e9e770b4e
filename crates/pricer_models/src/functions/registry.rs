//! Host-facing function registry.
//!
//! Binds loosely typed host arguments to a [`FunctionId`]'s signature,
//! applies defaults, builds the model and returns one `f64`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use pricer_core::types::OptionType;
use tracing::debug;

use super::error::FunctionError;
use super::signature::{FunctionId, Model, ParamDefault, ParamSpec};
use super::value::HostValue;
use crate::analytical::{AnalyticalError, Black76, BlackScholesMerton, ClosedFormModel};
use crate::batch::FunctionCall;

/// How the registry treats inputs the closed-form formulas cannot price.
///
/// - `Strict`: unknown option types and degenerate numbers are errors.
/// - `Legacy`: reproduces the unchecked workbook. Degenerate numbers
///   propagate as NaN/∞; an unknown option type yields `0.0` for the BSM
///   price/delta/theta/rho functions and the put branch for Black-76.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionTypePolicy {
    /// Validate everything
    #[default]
    Strict,
    /// Unchecked, quirk-compatible evaluation
    Legacy,
}

impl OptionTypePolicy {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionTypePolicy::Strict => "strict",
            OptionTypePolicy::Legacy => "legacy",
        }
    }
}

impl FromStr for OptionTypePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(OptionTypePolicy::Strict),
            "legacy" => Ok(OptionTypePolicy::Legacy),
            _ => Err(format!(
                "Invalid option type policy: {} (expected 'strict' or 'legacy')",
                s
            )),
        }
    }
}

impl fmt::Display for OptionTypePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option type as resolved from a `CP` argument.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Known(OptionType),
    /// Unrecognised text accepted under the legacy policy.
    Unknown,
}

/// Fully bound arguments: numbers in signature order plus the side.
struct Bound {
    numbers: [f64; 6],
    side: Side,
}

/// Registry of the sixteen spreadsheet functions.
///
/// # Examples
/// ```
/// use pricer_models::functions::{FunctionRegistry, HostValue};
///
/// let registry = FunctionRegistry::default();
/// let args = [100.0, 100.0, 1.0, 0.05, 0.0, 0.2].map(HostValue::from);
/// let call = registry.evaluate("bsm", &args).unwrap();
/// assert!((call - 10.4506).abs() < 1e-3);
///
/// // trailing defaults: T=1, r=0, q=0, sigma=0.16, CP=call
/// let atm = registry.evaluate("BSM", &[100.0.into(), 100.0.into()]).unwrap();
/// assert!(atm > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionRegistry {
    policy: OptionTypePolicy,
}

impl FunctionRegistry {
    /// Creates a registry with the given policy.
    pub fn new(policy: OptionTypePolicy) -> Self {
        Self { policy }
    }

    /// Active policy.
    pub fn policy(&self) -> OptionTypePolicy {
        self.policy
    }

    /// Every registered function.
    pub fn functions(&self) -> impl Iterator<Item = FunctionId> {
        FunctionId::all()
    }

    /// Resolves a function name, ignoring case.
    pub fn lookup(&self, name: &str) -> Result<FunctionId, FunctionError> {
        name.parse()
    }

    /// Evaluates `name` with positional arguments.
    pub fn evaluate(&self, name: &str, args: &[HostValue]) -> Result<f64, FunctionError> {
        self.evaluate_with(name, args, &BTreeMap::new())
    }

    /// Evaluates `name` with positional and named arguments.
    pub fn evaluate_with(
        &self,
        name: &str,
        args: &[HostValue],
        named: &BTreeMap<String, HostValue>,
    ) -> Result<f64, FunctionError> {
        let id = self.lookup(name)?;
        self.evaluate_id(id, args, named)
    }

    /// Evaluates one batch entry.
    pub fn evaluate_call(&self, call: &FunctionCall) -> Result<f64, FunctionError> {
        self.evaluate_with(&call.function, &call.args, &call.named)
    }

    /// Evaluates an already resolved function.
    pub fn evaluate_id(
        &self,
        id: FunctionId,
        args: &[HostValue],
        named: &BTreeMap<String, HostValue>,
    ) -> Result<f64, FunctionError> {
        let bound = self.bind(id, args, named)?;
        let value = self.compute(id, &bound)?;
        debug!(function = %id, policy = %self.policy, value, "evaluated");
        Ok(value)
    }

    fn bind(
        &self,
        id: FunctionId,
        args: &[HostValue],
        named: &BTreeMap<String, HostValue>,
    ) -> Result<Bound, FunctionError> {
        let params = id.params();
        if args.len() > params.len() {
            return Err(FunctionError::TooManyArguments {
                function: id.name(),
                expected: params.len(),
                got: args.len(),
            });
        }

        let mut slots: Vec<Option<&HostValue>> = (0..params.len())
            .map(|i| args.get(i).filter(|v| !v.is_empty()))
            .collect();

        for (key, value) in named {
            let index = params
                .iter()
                .position(|p| p.name.eq_ignore_ascii_case(key))
                .ok_or_else(|| FunctionError::UnknownParameter {
                    function: id.name(),
                    param: key.clone(),
                })?;
            if value.is_empty() {
                continue;
            }
            if slots[index].is_some() {
                return Err(FunctionError::DuplicateArgument {
                    function: id.name(),
                    param: params[index].name,
                });
            }
            slots[index] = Some(value);
        }

        let mut numbers = [0.0; 6];
        let mut side = Side::Known(OptionType::Call);
        for (spec, slot) in params.iter().zip(slots) {
            if spec.name == "CP" {
                side = self.resolve_side(id, spec, slot)?;
            } else {
                let index = numeric_index(id.model(), spec.name);
                numbers[index] = resolve_number(id, spec, slot)?;
            }
        }
        Ok(Bound { numbers, side })
    }

    fn resolve_side(
        &self,
        id: FunctionId,
        spec: &ParamSpec,
        slot: Option<&HostValue>,
    ) -> Result<Side, FunctionError> {
        match slot {
            Some(HostValue::Text(text)) => match text.parse::<OptionType>() {
                Ok(option_type) => Ok(Side::Known(option_type)),
                Err(_) if self.policy == OptionTypePolicy::Legacy => Ok(Side::Unknown),
                Err(err) => Err(AnalyticalError::from(err).into()),
            },
            Some(other) => Err(FunctionError::TypeMismatch {
                function: id.name(),
                param: spec.name,
                expected: "text",
                got: other.kind(),
            }),
            None => match spec.default {
                ParamDefault::OptionType(option_type) => Ok(Side::Known(option_type)),
                _ => Err(FunctionError::MissingArgument {
                    function: id.name(),
                    param: spec.name,
                }),
            },
        }
    }

    fn compute(&self, id: FunctionId, bound: &Bound) -> Result<f64, FunctionError> {
        let measure = id.measure();
        let option_type = match (bound.side, id.model()) {
            (Side::Known(option_type), _) => option_type,
            // BSM compares against both "call" and "put" and returns 0.0 when neither matches
            (Side::Unknown, Model::Bsm) => return Ok(0.0),
            // Black-76 tests only for "call"
            (Side::Unknown, Model::Black76) => OptionType::Put,
        };

        let [a, k, t, r, b, sigma] = bound.numbers;
        let strict = self.policy == OptionTypePolicy::Strict;
        let value = match id.model() {
            Model::Bsm => {
                let model = if strict {
                    BlackScholesMerton::new(a, k, t, r, b, sigma)?
                } else {
                    BlackScholesMerton::new_unchecked(a, k, t, r, b, sigma)
                };
                model.measure(measure, option_type)
            }
            Model::Black76 => {
                let model = if strict {
                    Black76::new(a, k, t, r, sigma)?
                } else {
                    Black76::new_unchecked(a, k, t, r, sigma)
                };
                model.measure(measure, option_type)
            }
        };
        if strict && !value.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                function: id.name(),
            }
            .into());
        }
        Ok(value)
    }
}

/// Slot of a numeric parameter in [`Bound::numbers`]:
/// `[S|F, K, T, r, q, sigma]`; Black-76 leaves `q` unused.
fn numeric_index(model: Model, name: &str) -> usize {
    match (model, name) {
        (_, "K") => 1,
        (_, "T") => 2,
        (_, "r") => 3,
        (Model::Bsm, "q") => 4,
        (_, "sigma") => 5,
        _ => 0,
    }
}

fn resolve_number(
    id: FunctionId,
    spec: &ParamSpec,
    slot: Option<&HostValue>,
) -> Result<f64, FunctionError> {
    match slot {
        Some(HostValue::Number(value)) => Ok(*value),
        Some(other) => Err(FunctionError::TypeMismatch {
            function: id.name(),
            param: spec.name,
            expected: "number",
            got: other.kind(),
        }),
        None => match spec.default {
            ParamDefault::Number(value) => Ok(value),
            _ => Err(FunctionError::MissingArgument {
                function: id.name(),
                param: spec.name,
            }),
        },
    }
}
