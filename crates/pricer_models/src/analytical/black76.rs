//! Black-76 model for European options on forwards and futures.
//!
//! **Call Price**: C = e^(-rT)·(F·N(d₁) - K·N(d₂))
//! **Put Price**: P = e^(-rT)·(K·N(-d₂) - F·N(-d₁))
//!
//! with d₁ = (ln(F/K) + σ²T/2) / (σ√T) and d₂ = d₁ - σ√T.
//!
//! Internally this is the lognormal kernel with the forward as underlying
//! and a yield equal to the rate, so the Greeks are the BSM ones with `F`
//! in place of `S` and `e^(-rT)` in place of `e^(-qT)`. Rho keeps the
//! strike-leg form `±K·T·e^(-rT)·N(±d₂)`.

use num_traits::Float;
use pricer_core::types::OptionType;

use super::error::AnalyticalError;
use super::lognormal::LognormalKernel;
use super::model::{as_f64, ensure_finite, forward_to_kernel};

/// Black-76 model. All five inputs are required; there are no defaults.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{Black76, ClosedFormModel};
/// use pricer_core::types::OptionType;
///
/// let b76 = Black76::new(100.0_f64, 95.0, 0.5, 0.03, 0.25).unwrap();
/// let parity = b76.price(OptionType::Call) - b76.price(OptionType::Put);
/// assert!((parity - (-0.015_f64).exp() * 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Black76<T: Float> {
    kernel: LognormalKernel<T>,
}

impl<T: Float> Black76<T> {
    /// Creates a validated model.
    ///
    /// # Errors
    /// - `AnalyticalError::NonFiniteInput` if any input is NaN or infinite
    /// - `AnalyticalError::InvalidForward` if forward <= 0
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(
        forward: T,
        strike: T,
        expiry: T,
        rate: T,
        volatility: T,
    ) -> Result<Self, AnalyticalError> {
        ensure_finite(&[
            ("F", forward),
            ("K", strike),
            ("T", expiry),
            ("r", rate),
            ("sigma", volatility),
        ])?;

        let zero = T::zero();
        if forward <= zero {
            return Err(AnalyticalError::InvalidForward {
                forward: as_f64(forward),
            });
        }
        if strike <= zero {
            return Err(AnalyticalError::InvalidStrike {
                strike: as_f64(strike),
            });
        }
        if expiry <= zero {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: as_f64(expiry),
            });
        }
        if volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: as_f64(volatility),
            });
        }

        Ok(Self::new_unchecked(forward, strike, expiry, rate, volatility))
    }

    /// Creates a model without validation; degenerate inputs yield NaN or ±∞.
    pub fn new_unchecked(forward: T, strike: T, expiry: T, rate: T, volatility: T) -> Self {
        Self {
            kernel: LognormalKernel {
                underlying: forward,
                strike,
                expiry,
                rate,
                yield_rate: rate,
                volatility,
            },
        }
    }

    /// Returns the forward price.
    #[inline]
    pub fn forward(&self) -> T {
        self.kernel.underlying
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> T {
        self.kernel.strike
    }

    /// Returns the time to expiry.
    #[inline]
    pub fn expiry(&self) -> T {
        self.kernel.expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.kernel.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.kernel.volatility
    }
}

forward_to_kernel!(Black76);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::{BlackScholesMerton, ClosedFormModel};
    use approx::assert_relative_eq;

    fn sample() -> Black76<f64> {
        Black76::new(102.0, 100.0, 0.75, 0.03, 0.22).unwrap()
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert_eq!(
            Black76::new(0.0, 100.0, 1.0, 0.0, 0.2).unwrap_err(),
            AnalyticalError::InvalidForward { forward: 0.0 }
        );
        assert_eq!(
            Black76::new(100.0, 100.0, 1.0, 0.0, 0.0).unwrap_err(),
            AnalyticalError::InvalidVolatility { volatility: 0.0 }
        );
        assert_eq!(
            Black76::new(100.0, 100.0, f64::NAN, 0.0, 0.2).unwrap_err(),
            AnalyticalError::NonFiniteInput { name: "T" }
        );
    }

    #[test]
    fn test_d1_has_no_carry() {
        let m = sample();
        let expected = ((102.0_f64 / 100.0).ln() + 0.5 * 0.22 * 0.22 * 0.75) / (0.22 * 0.75_f64.sqrt());
        assert_relative_eq!(m.d1(), expected, epsilon = 1e-14);
        assert_relative_eq!(m.d1() - m.d2(), 0.22 * 0.75_f64.sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_price_formula() {
        let m = sample();
        let df = (-0.03_f64 * 0.75).exp();
        let call = df
            * (102.0 * pricer_core::math::norm_cdf(m.d1())
                - 100.0 * pricer_core::math::norm_cdf(m.d2()));
        assert_relative_eq!(m.price(OptionType::Call), call, epsilon = 1e-12);
    }

    #[test]
    fn test_put_call_parity() {
        let m = sample();
        let lhs = m.price(OptionType::Call) - m.price(OptionType::Put);
        let rhs = (-0.03_f64 * 0.75).exp() * (102.0 - 100.0);
        assert_relative_eq!(lhs, rhs, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_bsm_on_forward_with_yield_equal_rate() {
        let b76 = sample();
        let bsm = BlackScholesMerton::new(102.0, 100.0, 0.75, 0.03, 0.03, 0.22).unwrap();
        for option_type in OptionType::ALL {
            assert_eq!(b76.greeks(option_type), bsm.greeks(option_type));
        }
    }

    #[test]
    fn test_delta_is_discounted_cdf() {
        let m = sample();
        let df = (-0.03_f64 * 0.75).exp();
        assert_relative_eq!(
            m.delta(OptionType::Call),
            df * pricer_core::math::norm_cdf(m.d1()),
            epsilon = 1e-14
        );
        assert_relative_eq!(
            m.delta(OptionType::Call) - m.delta(OptionType::Put),
            df,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_theta_formula() {
        let m = sample();
        let df = (-0.03_f64 * 0.75).exp();
        let n = pricer_core::math::norm_cdf::<f64>;
        let decay = -102.0 * df * pricer_core::math::norm_pdf(m.d1()) * 0.22 / (2.0 * 0.75_f64.sqrt());
        let call = decay - 0.03 * 100.0 * df * n(m.d2()) + 0.03 * 102.0 * df * n(m.d1());
        let put = decay + 0.03 * 100.0 * df * n(-m.d2()) - 0.03 * 102.0 * df * n(-m.d1());
        assert_relative_eq!(m.theta(OptionType::Call), call, epsilon = 1e-12);
        assert_relative_eq!(m.theta(OptionType::Put), put, epsilon = 1e-12);
    }

    #[test]
    fn test_rho_strike_leg_form() {
        let m = sample();
        let annuity = 100.0 * 0.75 * (-0.03_f64 * 0.75).exp();
        assert_relative_eq!(
            m.rho(OptionType::Call),
            annuity * pricer_core::math::norm_cdf(m.d2()),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            m.rho(OptionType::Put),
            -annuity * pricer_core::math::norm_cdf(-m.d2()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_gamma_and_vega_vs_finite_diff() {
        let h = 0.01;
        let up = Black76::new(102.0 + h, 100.0, 0.75, 0.03, 0.22).unwrap();
        let dn = Black76::new(102.0 - h, 100.0, 0.75, 0.03, 0.22).unwrap();
        let fd_gamma = (up.delta(OptionType::Call) - dn.delta(OptionType::Call)) / (2.0 * h);
        assert_relative_eq!(sample().gamma(), fd_gamma, epsilon = 1e-5);

        let h = 1e-3;
        let up = Black76::new(102.0, 100.0, 0.75, 0.03, 0.22 + h).unwrap();
        let dn = Black76::new(102.0, 100.0, 0.75, 0.03, 0.22 - h).unwrap();
        let fd_vega = (up.price(OptionType::Put) - dn.price(OptionType::Put)) / (2.0 * h);
        assert_relative_eq!(sample().vega(), fd_vega, epsilon = 1e-3);
    }

    #[test]
    fn test_accessors() {
        let m = sample();
        assert_eq!(m.forward(), 102.0);
        assert_eq!(m.strike(), 100.0);
        assert_eq!(m.expiry(), 0.75);
        assert_eq!(m.rate(), 0.03);
        assert_eq!(m.volatility(), 0.22);
    }
}
