//! Standard normal distribution functions.
//!
//! Both functions are generic over `T: Float` so the same formulas serve
//! `f64` pricing and `f32` batch workloads. Evaluation happens in `f64`.
//!
//! `norm_cdf` is `erfc(-x/√2)/2` on a full-precision erfc, so it keeps
//! double-precision relative accuracy deep in the lower tail where
//! out-of-the-money prices are formed.

use std::f64::consts::SQRT_2;

use num_traits::Float;
use statrs::function::erf::erfc;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Standard normal cumulative distribution function Φ(x).
///
/// # Accuracy
/// Relative error within a few ulps for all finite `x`, including the far
/// lower tail. `Φ(0)` is exactly 0.5. NaN propagates.
///
/// # Examples
/// ```
/// use pricer_core::math::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!((norm_cdf(1.0_f64) + norm_cdf(-1.0_f64) - 1.0).abs() < 1e-15);
/// assert!((norm_cdf(-8.0_f64) / 6.220960574271819e-16 - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    match x.to_f64() {
        Some(x) => constant(0.5 * erfc(-x / SQRT_2)),
        None => T::nan(),
    }
}

/// Standard normal probability density function φ(x) = e^(-x²/2) / √(2π).
///
/// # Examples
/// ```
/// use pricer_core::math::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    constant::<T>(FRAC_1_SQRT_2PI) * (-constant::<T>(0.5) * x * x).exp()
}
