//! Common interface of the closed-form models.

use num_traits::Float;
use pricer_core::types::OptionType;

use super::greeks::{Greeks, Measure};

/// A European option model with analytic price and Greeks.
///
/// Implemented by [`BlackScholesMerton`](super::BlackScholesMerton) and
/// [`Black76`](super::Black76). Calls are independent and stateless; a
/// model value is just its validated inputs.
pub trait ClosedFormModel<T: Float> {
    /// Standardised moneyness d₁.
    fn d1(&self) -> T;
    /// d₂ = d₁ - σ√T.
    fn d2(&self) -> T;
    /// Fair value.
    fn price(&self, option_type: OptionType) -> T;
    /// Sensitivity to the underlying.
    fn delta(&self, option_type: OptionType) -> T;
    /// Second sensitivity to the underlying; identical for calls and puts.
    fn gamma(&self) -> T;
    /// Sensitivity to volatility; identical for calls and puts.
    fn vega(&self) -> T;
    /// Time decay.
    fn theta(&self, option_type: OptionType) -> T;
    /// Sensitivity to the risk-free rate.
    fn rho(&self, option_type: OptionType) -> T;
    /// Cross sensitivity underlying/volatility.
    fn vanna(&self) -> T;
    /// Second sensitivity to volatility.
    fn volga(&self) -> T;
    /// Everything at once, sharing d₁/d₂.
    fn greeks(&self, option_type: OptionType) -> Greeks<T>;

    /// Evaluates a single measure. `option_type` is ignored by measures
    /// that do not depend on it.
    fn measure(&self, measure: Measure, option_type: OptionType) -> T {
        match measure {
            Measure::Price => self.price(option_type),
            Measure::Delta => self.delta(option_type),
            Measure::Gamma => self.gamma(),
            Measure::Vega => self.vega(),
            Measure::Theta => self.theta(option_type),
            Measure::Rho => self.rho(option_type),
            Measure::Vanna => self.vanna(),
            Measure::Volga => self.volga(),
        }
    }
}

/// Implements [`ClosedFormModel`] by forwarding to the model's `kernel` field.
macro_rules! forward_to_kernel {
    ($model:ident) => {
        impl<T: Float> $crate::analytical::ClosedFormModel<T> for $model<T> {
            #[inline]
            fn d1(&self) -> T {
                self.kernel.d1()
            }
            #[inline]
            fn d2(&self) -> T {
                self.kernel.d2()
            }
            #[inline]
            fn price(&self, option_type: OptionType) -> T {
                self.kernel.price(option_type)
            }
            #[inline]
            fn delta(&self, option_type: OptionType) -> T {
                self.kernel.delta(option_type)
            }
            #[inline]
            fn gamma(&self) -> T {
                self.kernel.gamma()
            }
            #[inline]
            fn vega(&self) -> T {
                self.kernel.vega()
            }
            #[inline]
            fn theta(&self, option_type: OptionType) -> T {
                self.kernel.theta(option_type)
            }
            #[inline]
            fn rho(&self, option_type: OptionType) -> T {
                self.kernel.rho(option_type)
            }
            #[inline]
            fn vanna(&self) -> T {
                self.kernel.vanna()
            }
            #[inline]
            fn volga(&self) -> T {
                self.kernel.volga()
            }
            fn greeks(&self, option_type: OptionType) -> $crate::analytical::Greeks<T> {
                self.kernel.greeks(option_type)
            }
        }
    };
}

pub(crate) use forward_to_kernel;

#[inline]
pub(crate) fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Rejects NaN and ±∞, naming the offending input.
pub(crate) fn ensure_finite<T: Float>(
    inputs: &[(&'static str, T)],
) -> Result<(), super::AnalyticalError> {
    match inputs.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(name, _)) => Err(super::AnalyticalError::NonFiniteInput { name }),
        None => Ok(()),
    }
}
