//! Price and sensitivity bundle.
//!
//! [`Measure`] names one output of a closed-form model (the price or one
//! Greek); [`Greeks`] holds all of them for a single option type.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

/// One output of a closed-form model.
///
/// Vega, gamma, vanna and volga are identical for calls and puts, so
/// they do not take an option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Measure {
    /// Fair value
    Price,
    /// ∂V/∂S (or ∂V/∂F)
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// Time decay
    Theta,
    /// ∂V/∂r
    Rho,
    /// ∂²V/∂S∂σ
    Vanna,
    /// ∂²V/∂σ²
    Volga,
}

impl Measure {
    /// Every measure, price first.
    pub const ALL: [Measure; 8] = [
        Measure::Price,
        Measure::Delta,
        Measure::Vega,
        Measure::Theta,
        Measure::Rho,
        Measure::Gamma,
        Measure::Vanna,
        Measure::Volga,
    ];

    /// Whether the value differs between calls and puts.
    pub fn takes_option_type(&self) -> bool {
        matches!(
            self,
            Measure::Price | Measure::Delta | Measure::Theta | Measure::Rho
        )
    }

    /// Lowercase name ("price", "delta", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Price => "price",
            Measure::Delta => "delta",
            Measure::Gamma => "gamma",
            Measure::Vega => "vega",
            Measure::Theta => "theta",
            Measure::Rho => "rho",
            Measure::Vanna => "vanna",
            Measure::Volga => "volga",
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown measure: {}", s))
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price and all Greeks of one option under one set of inputs.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackScholesMerton, ClosedFormModel, Measure};
/// use pricer_core::types::OptionType;
///
/// let bsm = BlackScholesMerton::new(100.0_f64, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let greeks = bsm.greeks(OptionType::Call);
/// assert_eq!(greeks.get(Measure::Delta), greeks.delta);
/// assert!(greeks.gamma > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T: Float> {
    /// Fair value
    pub price: T,
    /// First derivative with respect to the underlying
    pub delta: T,
    /// Second derivative with respect to the underlying
    pub gamma: T,
    /// Derivative with respect to volatility
    pub vega: T,
    /// Time decay
    pub theta: T,
    /// Derivative with respect to the risk-free rate
    pub rho: T,
    /// Cross derivative underlying/volatility
    pub vanna: T,
    /// Second derivative with respect to volatility
    pub volga: T,
}

impl<T: Float> Greeks<T> {
    /// Returns the field named by `measure`.
    pub fn get(&self, measure: Measure) -> T {
        match measure {
            Measure::Price => self.price,
            Measure::Delta => self.delta,
            Measure::Gamma => self.gamma,
            Measure::Vega => self.vega,
            Measure::Theta => self.theta,
            Measure::Rho => self.rho,
            Measure::Vanna => self.vanna,
            Measure::Volga => self.volga,
        }
    }

    /// True when every field is finite.
    pub fn is_finite(&self) -> bool {
        Measure::ALL.iter().all(|&m| self.get(m).is_finite())
    }
}
