//! Black-Scholes-Merton model for European options on a spot asset.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Greeks follow the same parameterisation; see [`ClosedFormModel`].

use num_traits::Float;
use pricer_core::types::OptionType;

use super::error::AnalyticalError;
use super::lognormal::LognormalKernel;
use super::model::{as_f64, ensure_finite, forward_to_kernel};

/// Default time to expiry in years.
pub const DEFAULT_EXPIRY: f64 = 1.0;
/// Default risk-free rate.
pub const DEFAULT_RATE: f64 = 0.0;
/// Default continuous dividend yield.
pub const DEFAULT_DIVIDEND_YIELD: f64 = 0.0;
/// Default annualised volatility.
pub const DEFAULT_VOLATILITY: f64 = 0.16;

/// Black-Scholes-Merton model with continuous dividend yield.
///
/// Holds one validated set of inputs; every price or Greek is a pure
/// function of them.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackScholesMerton, ClosedFormModel};
/// use pricer_core::types::OptionType;
///
/// let bsm = BlackScholesMerton::new(100.0_f64, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bsm.price(OptionType::Call);
/// let put = bsm.price(OptionType::Put);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesMerton<T: Float> {
    kernel: LognormalKernel<T>,
}

impl<T: Float> BlackScholesMerton<T> {
    /// Creates a validated model.
    ///
    /// # Arguments
    /// * `spot` - Spot price S (must be positive)
    /// * `strike` - Strike K (must be positive)
    /// * `expiry` - Time to expiry T in years (must be positive)
    /// * `rate` - Continuously compounded risk-free rate r
    /// * `dividend_yield` - Continuous dividend or carry yield q
    /// * `volatility` - Annualised volatility σ (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::NonFiniteInput` if any input is NaN or infinite
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholesMerton;
    ///
    /// assert!(BlackScholesMerton::new(100.0_f64, 100.0, 1.0, 0.0, 0.0, 0.16).is_ok());
    /// assert!(BlackScholesMerton::new(100.0_f64, 100.0, 0.0, 0.0, 0.0, 0.16).is_err());
    /// assert!(BlackScholesMerton::new(100.0_f64, 100.0, 1.0, 0.0, 0.0, 0.0).is_err());
    /// ```
    pub fn new(
        spot: T,
        strike: T,
        expiry: T,
        rate: T,
        dividend_yield: T,
        volatility: T,
    ) -> Result<Self, AnalyticalError> {
        ensure_finite(&[
            ("S", spot),
            ("K", strike),
            ("T", expiry),
            ("r", rate),
            ("q", dividend_yield),
            ("sigma", volatility),
        ])?;

        let zero = T::zero();
        if spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: as_f64(spot),
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

        Ok(Self::new_unchecked(
            spot,
            strike,
            expiry,
            rate,
            dividend_yield,
            volatility,
        ))
    }

    /// Creates a model without validation.
    ///
    /// Degenerate inputs (T = 0, σ = 0, S or K <= 0) are not rejected; they
    /// reach the logarithm and divisions and surface as NaN or ±∞ in every
    /// result. Intended only for hosts that must reproduce unchecked
    /// spreadsheet behaviour.
    pub fn new_unchecked(
        spot: T,
        strike: T,
        expiry: T,
        rate: T,
        dividend_yield: T,
        volatility: T,
    ) -> Self {
        Self {
            kernel: LognormalKernel {
                underlying: spot,
                strike,
                expiry,
                rate,
                yield_rate: dividend_yield,
                volatility,
            },
        }
    }

    /// Starts a builder with the spreadsheet defaults
    /// (T = 1, r = 0, q = 0, σ = 0.16).
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::{BlackScholesMerton, ClosedFormModel};
    /// use pricer_core::types::OptionType;
    ///
    /// let bsm = BlackScholesMerton::builder(100.0_f64, 100.0)
    ///     .rate(0.05)
    ///     .volatility(0.2)
    ///     .build()
    ///     .unwrap();
    /// assert!((bsm.price(OptionType::Call) - 10.450583572).abs() < 1e-6);
    /// ```
    pub fn builder(spot: T, strike: T) -> BlackScholesMertonBuilder<T> {
        BlackScholesMertonBuilder::new(spot, strike)
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
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

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.kernel.yield_rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.kernel.volatility
    }
}

forward_to_kernel!(BlackScholesMerton);

/// Builder for [`BlackScholesMerton`] starting from the spreadsheet defaults.
#[derive(Debug, Clone, Copy)]
pub struct BlackScholesMertonBuilder<T: Float> {
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    dividend_yield: T,
    volatility: T,
}

impl<T: Float> BlackScholesMertonBuilder<T> {
    fn new(spot: T, strike: T) -> Self {
        let constant = |value: f64| T::from(value).unwrap_or_else(T::nan);
        Self {
            spot,
            strike,
            expiry: constant(DEFAULT_EXPIRY),
            rate: constant(DEFAULT_RATE),
            dividend_yield: constant(DEFAULT_DIVIDEND_YIELD),
            volatility: constant(DEFAULT_VOLATILITY),
        }
    }

    /// Sets the time to expiry in years.
    pub fn expiry(mut self, expiry: T) -> Self {
        self.expiry = expiry;
        self
    }

    /// Sets the risk-free rate.
    pub fn rate(mut self, rate: T) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the continuous dividend yield.
    pub fn dividend_yield(mut self, dividend_yield: T) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: T) -> Self {
        self.volatility = volatility;
        self
    }

    /// Validates and builds the model.
    pub fn build(self) -> Result<BlackScholesMerton<T>, AnalyticalError> {
        BlackScholesMerton::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.dividend_yield,
            self.volatility,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::ClosedFormModel;
    use approx::assert_relative_eq;

    fn textbook() -> BlackScholesMerton<f64> {
        BlackScholesMerton::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap()
    }

    fn with_dividend() -> BlackScholesMerton<f64> {
        BlackScholesMerton::new(110.0, 100.0, 0.5, 0.04, 0.02, 0.3).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_accessors() {
        let m = with_dividend();
        assert_eq!(m.spot(), 110.0);
        assert_eq!(m.strike(), 100.0);
        assert_eq!(m.expiry(), 0.5);
        assert_eq!(m.rate(), 0.04);
        assert_eq!(m.dividend_yield(), 0.02);
        assert_eq!(m.volatility(), 0.3);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert_eq!(
            BlackScholesMerton::new(0.0, 100.0, 1.0, 0.0, 0.0, 0.2).unwrap_err(),
            AnalyticalError::InvalidSpot { spot: 0.0 }
        );
        assert_eq!(
            BlackScholesMerton::new(100.0, -5.0, 1.0, 0.0, 0.0, 0.2).unwrap_err(),
            AnalyticalError::InvalidStrike { strike: -5.0 }
        );
        assert_eq!(
            BlackScholesMerton::new(100.0, 100.0, 0.0, 0.0, 0.0, 0.2).unwrap_err(),
            AnalyticalError::InvalidExpiry { expiry: 0.0 }
        );
        assert_eq!(
            BlackScholesMerton::new(100.0, 100.0, 1.0, 0.0, 0.0, -0.2).unwrap_err(),
            AnalyticalError::InvalidVolatility { volatility: -0.2 }
        );
    }

    #[test]
    fn test_rejects_non_finite_inputs() {
        assert_eq!(
            BlackScholesMerton::new(100.0, 100.0, 1.0, f64::NAN, 0.0, 0.2).unwrap_err(),
            AnalyticalError::NonFiniteInput { name: "r" }
        );
        assert_eq!(
            BlackScholesMerton::new(100.0, 100.0, 1.0, 0.0, f64::INFINITY, 0.2).unwrap_err(),
            AnalyticalError::NonFiniteInput { name: "q" }
        );
    }

    #[test]
    fn test_negative_rate_and_yield_allowed() {
        assert!(BlackScholesMerton::new(100.0, 100.0, 1.0, -0.01, -0.02, 0.2).is_ok());
    }

    #[test]
    fn test_unchecked_propagates_nan() {
        let m = BlackScholesMerton::new_unchecked(100.0, 100.0, 0.0, 0.0, 0.0, 0.2);
        assert!(m.price(OptionType::Call).is_nan());
        let m = BlackScholesMerton::new_unchecked(-1.0, 100.0, 1.0, 0.0, 0.0, 0.2);
        assert!(m.delta(OptionType::Call).is_nan());
    }

    #[test]
    fn test_builder_defaults() {
        let built = BlackScholesMerton::builder(100.0_f64, 95.0).build().unwrap();
        let explicit = BlackScholesMerton::new(100.0, 95.0, 1.0, 0.0, 0.0, 0.16).unwrap();
        assert_eq!(built, explicit);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_textbook_prices() {
        let m = textbook();
        assert_relative_eq!(m.price(OptionType::Call), 10.450583572185565, epsilon = 1e-9);
        assert_relative_eq!(m.price(OptionType::Put), 5.573526022256971, epsilon = 1e-9);
    }

    #[test]
    fn test_deep_otm_call_relative_accuracy() {
        let far = BlackScholesMerton::new(100.0, 250.0, 1.0, 0.0, 0.0, 0.2).unwrap();
        assert_relative_eq!(
            far.price(OptionType::Call),
            1.4621918671909792e-5,
            max_relative = 1e-9
        );
        let near = BlackScholesMerton::new(100.0, 200.0, 1.0, 0.0, 0.0, 0.2).unwrap();
        assert_relative_eq!(
            near.price(OptionType::Call),
            0.0018862181761500757,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_atm_put_vanishes_with_volatility() {
        let m = BlackScholesMerton::new(100.0, 100.0, 1.0, 0.0, 0.0, 1e-300).unwrap();
        assert!(m.price(OptionType::Put).abs() < 1e-12);
        assert!(m.price(OptionType::Call).abs() < 1e-12);
    }

    #[test]
    fn test_put_call_parity_with_dividend() {
        let m = with_dividend();
        let lhs = m.price(OptionType::Call) - m.price(OptionType::Put);
        let rhs = 110.0 * (-0.02_f64 * 0.5).exp() - 100.0 * (-0.04_f64 * 0.5).exp();
        assert_relative_eq!(lhs, rhs, max_relative = 1e-10);
    }

    #[test]
    fn test_atm_zero_carry_symmetry() {
        let m = BlackScholesMerton::new(100.0, 100.0, 2.0, 0.0, 0.0, 0.25).unwrap();
        assert_relative_eq!(
            m.price(OptionType::Call),
            m.price(OptionType::Put),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_deep_itm_call_close_to_forward_intrinsic() {
        let m = BlackScholesMerton::new(200.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        let intrinsic = 200.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(m.price(OptionType::Call), intrinsic, epsilon = 1e-3);
        assert_relative_eq!(m.price(OptionType::Call), 104.87772423432371, epsilon = 1e-9);
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_delta_bounds_with_dividend() {
        let bound = (-0.02_f64 * 0.5).exp();
        for strike in [60.0, 90.0, 110.0, 160.0] {
            let m = BlackScholesMerton::new(110.0, strike, 0.5, 0.04, 0.02, 0.3).unwrap();
            let call = m.delta(OptionType::Call);
            let put = m.delta(OptionType::Put);
            assert!((0.0..=bound).contains(&call));
            assert!((-bound..=0.0).contains(&put));
            assert_relative_eq!(call - put, bound, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_textbook_greeks() {
        // S = K = 100, T = 1, r = 5%, σ = 20%: d1 = 0.35, d2 = 0.15
        let m = textbook();
        assert_relative_eq!(m.d1(), 0.35, epsilon = 1e-12);
        assert_relative_eq!(m.d2(), 0.15, epsilon = 1e-12);
        assert_relative_eq!(m.delta(OptionType::Call), 0.636831, epsilon = 1e-5);
        assert_relative_eq!(m.gamma(), 0.018762, epsilon = 1e-5);
        assert_relative_eq!(m.vega(), 37.524035, epsilon = 1e-4);
        assert_relative_eq!(m.theta(OptionType::Call), -6.414028, epsilon = 1e-3);
        assert_relative_eq!(m.rho(OptionType::Call), 53.232482, epsilon = 1e-3);
    }

    #[test]
    fn test_delta_vs_finite_diff() {
        let h = 0.01;
        for option_type in OptionType::ALL {
            let up = BlackScholesMerton::new(110.0 + h, 100.0, 0.5, 0.04, 0.02, 0.3).unwrap();
            let dn = BlackScholesMerton::new(110.0 - h, 100.0, 0.5, 0.04, 0.02, 0.3).unwrap();
            let fd = (up.price(option_type) - dn.price(option_type)) / (2.0 * h);
            assert_relative_eq!(with_dividend().delta(option_type), fd, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_gamma_vs_finite_diff() {
        let h = 0.5;
        let up = BlackScholesMerton::new(110.0 + h, 100.0, 0.5, 0.04, 0.02, 0.3).unwrap();
        let dn = BlackScholesMerton::new(110.0 - h, 100.0, 0.5, 0.04, 0.02, 0.3).unwrap();
        let fd = (up.delta(OptionType::Call) - dn.delta(OptionType::Call)) / (2.0 * h);
        assert_relative_eq!(with_dividend().gamma(), fd, epsilon = 1e-5);
    }

    #[test]
    fn test_vega_vanna_volga_vs_finite_diff() {
        let h = 1e-3;
        let up = BlackScholesMerton::new(110.0, 100.0, 0.5, 0.04, 0.02, 0.3 + h).unwrap();
        let dn = BlackScholesMerton::new(110.0, 100.0, 0.5, 0.04, 0.02, 0.3 - h).unwrap();
        let m = with_dividend();

        let fd_vega = (up.price(OptionType::Call) - dn.price(OptionType::Call)) / (2.0 * h);
        assert_relative_eq!(m.vega(), fd_vega, epsilon = 1e-3);

        let fd_vanna = (up.delta(OptionType::Call) - dn.delta(OptionType::Call)) / (2.0 * h);
        assert_relative_eq!(m.vanna(), fd_vanna, epsilon = 1e-4);

        let fd_volga = (up.vega() - dn.vega()) / (2.0 * h);
        assert_relative_eq!(m.volga(), fd_volga, epsilon = 1e-3);
    }

    #[test]
    fn test_rho_vs_finite_diff() {
        let h = 1e-4;
        for option_type in OptionType::ALL {
            let up = BlackScholesMerton::new(110.0, 100.0, 0.5, 0.04 + h, 0.02, 0.3).unwrap();
            let dn = BlackScholesMerton::new(110.0, 100.0, 0.5, 0.04 - h, 0.02, 0.3).unwrap();
            let fd = (up.price(option_type) - dn.price(option_type)) / (2.0 * h);
            assert_relative_eq!(with_dividend().rho(option_type), fd, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_theta_is_negative_time_derivative() {
        // theta here is ∂V/∂t = -∂V/∂T
        let h = 1e-4;
        for option_type in OptionType::ALL {
            let longer = BlackScholesMerton::new(110.0, 100.0, 0.5 + h, 0.04, 0.02, 0.3).unwrap();
            let shorter = BlackScholesMerton::new(110.0, 100.0, 0.5 - h, 0.04, 0.02, 0.3).unwrap();
            let fd = -(longer.price(option_type) - shorter.price(option_type)) / (2.0 * h);
            assert_relative_eq!(with_dividend().theta(option_type), fd, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_call_and_put_share_symmetric_greeks() {
        let m = with_dividend();
        let call = m.greeks(OptionType::Call);
        let put = m.greeks(OptionType::Put);
        assert_eq!(call.gamma, put.gamma);
        assert_eq!(call.vega, put.vega);
        assert_eq!(call.vanna, put.vanna);
        assert_eq!(call.volga, put.volga);
    }

    #[test]
    fn test_f32_compatibility() {
        let m = BlackScholesMerton::new(100.0_f32, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        assert!((m.price(OptionType::Call) - 10.4506).abs() < 1e-2);
    }
}
