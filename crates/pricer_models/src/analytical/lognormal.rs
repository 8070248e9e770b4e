//! Shared lognormal kernel behind both closed-form models.
//!
//! The kernel prices an option on an underlying `u` that pays a continuous
//! yield `y` under a flat risk-free rate `r`:
//!
//! - d₁ = (ln(u/K) + (r - y + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Black-Scholes-Merton uses `u = S`, `y = q`. Black-76 uses `u = F`,
//! `y = r`: the carry `r - y` vanishes and the underlying is discounted at
//! `e^(-rT)`, which is exactly the Black-76 formula set.
//!
//! No validation happens here; degenerate inputs surface as NaN or ±∞.

use num_traits::Float;
use pricer_core::math::{norm_cdf, norm_pdf};
use pricer_core::types::OptionType;

use super::greeks::Greeks;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LognormalKernel<T: Float> {
    pub(crate) underlying: T,
    pub(crate) strike: T,
    pub(crate) expiry: T,
    pub(crate) rate: T,
    pub(crate) yield_rate: T,
    pub(crate) volatility: T,
}

/// Intermediates shared by every formula of one evaluation.
#[derive(Debug, Clone, Copy)]
struct Terms<T> {
    d1: T,
    d2: T,
    sqrt_t: T,
    /// e^(-rT)
    discount: T,
    /// e^(-yT)
    yield_discount: T,
    /// φ(d₁)
    density: T,
}

impl<T: Float> LognormalKernel<T> {
    #[inline]
    fn terms(&self) -> Terms<T> {
        let half = T::from(0.5).unwrap_or_else(T::nan);
        let sqrt_t = self.expiry.sqrt();
        let vol_sqrt_t = self.volatility * sqrt_t;

        let log_moneyness = (self.underlying / self.strike).ln();
        let drift =
            (self.rate - self.yield_rate + half * self.volatility * self.volatility) * self.expiry;
        let d1 = (log_moneyness + drift) / vol_sqrt_t;

        Terms {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            discount: (-self.rate * self.expiry).exp(),
            yield_discount: (-self.yield_rate * self.expiry).exp(),
            density: norm_pdf(d1),
        }
    }

    #[inline]
    pub(crate) fn d1(&self) -> T {
        self.terms().d1
    }

    #[inline]
    pub(crate) fn d2(&self) -> T {
        self.terms().d2
    }

    #[inline]
    pub(crate) fn price(&self, option_type: OptionType) -> T {
        self.price_with(&self.terms(), option_type)
    }

    #[inline]
    pub(crate) fn delta(&self, option_type: OptionType) -> T {
        self.delta_with(&self.terms(), option_type)
    }

    #[inline]
    pub(crate) fn gamma(&self) -> T {
        self.gamma_with(&self.terms())
    }

    #[inline]
    pub(crate) fn vega(&self) -> T {
        self.vega_with(&self.terms())
    }

    #[inline]
    pub(crate) fn theta(&self, option_type: OptionType) -> T {
        self.theta_with(&self.terms(), option_type)
    }

    #[inline]
    pub(crate) fn rho(&self, option_type: OptionType) -> T {
        self.rho_with(&self.terms(), option_type)
    }

    #[inline]
    pub(crate) fn vanna(&self) -> T {
        self.vanna_with(&self.terms())
    }

    #[inline]
    pub(crate) fn volga(&self) -> T {
        self.volga_with(&self.terms())
    }

    pub(crate) fn greeks(&self, option_type: OptionType) -> Greeks<T> {
        let terms = self.terms();
        Greeks {
            price: self.price_with(&terms, option_type),
            delta: self.delta_with(&terms, option_type),
            gamma: self.gamma_with(&terms),
            vega: self.vega_with(&terms),
            theta: self.theta_with(&terms, option_type),
            rho: self.rho_with(&terms, option_type),
            vanna: self.vanna_with(&terms),
            volga: self.volga_with(&terms),
        }
    }

    fn price_with(&self, t: &Terms<T>, option_type: OptionType) -> T {
        let forward_leg = self.underlying * t.yield_discount;
        let strike_leg = self.strike * t.discount;
        match option_type {
            OptionType::Call => forward_leg * norm_cdf(t.d1) - strike_leg * norm_cdf(t.d2),
            OptionType::Put => strike_leg * norm_cdf(-t.d2) - forward_leg * norm_cdf(-t.d1),
        }
    }

    fn delta_with(&self, t: &Terms<T>, option_type: OptionType) -> T {
        match option_type {
            OptionType::Call => t.yield_discount * norm_cdf(t.d1),
            OptionType::Put => -t.yield_discount * norm_cdf(-t.d1),
        }
    }

    fn gamma_with(&self, t: &Terms<T>) -> T {
        t.yield_discount * t.density / (self.underlying * self.volatility * t.sqrt_t)
    }

    fn vega_with(&self, t: &Terms<T>) -> T {
        self.underlying * t.yield_discount * t.density * t.sqrt_t
    }

    fn theta_with(&self, t: &Terms<T>, option_type: OptionType) -> T {
        let two = T::one() + T::one();
        let forward_leg = self.underlying * t.yield_discount;
        // φ is even, so the put decay term shares φ(d₁)
        let decay = -forward_leg * t.density * self.volatility / (two * t.sqrt_t);
        let strike_carry = self.rate * self.strike * t.discount;
        let yield_carry = self.yield_rate * forward_leg;

        match option_type {
            OptionType::Call => {
                decay - strike_carry * norm_cdf(t.d2) + yield_carry * norm_cdf(t.d1)
            }
            OptionType::Put => {
                decay + strike_carry * norm_cdf(-t.d2) - yield_carry * norm_cdf(-t.d1)
            }
        }
    }

    fn rho_with(&self, t: &Terms<T>, option_type: OptionType) -> T {
        let strike_annuity = self.strike * self.expiry * t.discount;
        match option_type {
            OptionType::Call => strike_annuity * norm_cdf(t.d2),
            OptionType::Put => -strike_annuity * norm_cdf(-t.d2),
        }
    }

    fn vanna_with(&self, t: &Terms<T>) -> T {
        -t.yield_discount * t.density * t.d2 / self.volatility
    }

    fn volga_with(&self, t: &Terms<T>) -> T {
        self.vega_with(t) * t.d1 * t.d2 / self.volatility
    }
}
