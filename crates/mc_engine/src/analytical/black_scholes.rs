//! Black-Scholes prices for European options.
//!
//! **Call**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! with d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T) and d₂ = d₁ - σ√T.

use num_traits::Float;

use super::distributions::{lit, norm_cdf};
use crate::scenario::{MarketParams, OptionKind};

/// Black-Scholes model for a single underlying.
///
/// Inputs are taken as given; callers validate them first (the engine
/// does so through [`MarketParams`] validation).
///
/// # Examples
/// ```
/// use mc_engine::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2);
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K·exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model with spot `S`, rate `r` and volatility `σ`.
    pub fn new(spot: T, rate: T, volatility: T) -> Self {
        Self {
            spot,
            rate,
            volatility,
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Total standard deviation σ√T, or `None` when it is degenerate.
    #[inline]
    fn total_vol(&self, expiry: T) -> Option<T> {
        let total = self.volatility * expiry.sqrt();
        (total > lit::<T>(1e-12)).then_some(total)
    }

    /// d₁ and d₂ for the given strike and expiry.
    fn d1_d2(&self, strike: T, expiry: T, total_vol: T) -> (T, T) {
        let half = lit::<T>(0.5);
        let d1 = ((self.spot / strike).ln()
            + (self.rate + half * self.volatility * self.volatility) * expiry)
            / total_vol;
        (d1, d1 - total_vol)
    }

    /// European call price.
    ///
    /// With zero volatility the price collapses to the discounted
    /// intrinsic value of the forward.
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let df = (-self.rate * expiry).exp();
        match self.total_vol(expiry) {
            Some(total_vol) => {
                let (d1, d2) = self.d1_d2(strike, expiry, total_vol);
                self.spot * norm_cdf(d1) - strike * df * norm_cdf(d2)
            }
            None => (self.spot - strike * df).max(T::zero()),
        }
    }

    /// European put price.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let df = (-self.rate * expiry).exp();
        match self.total_vol(expiry) {
            Some(total_vol) => {
                let (d1, d2) = self.d1_d2(strike, expiry, total_vol);
                strike * df * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
            }
            None => (strike * df - self.spot).max(T::zero()),
        }
    }
}

/// Black-Scholes price of a European option described by `market`.
///
/// ```rust
/// use mc_engine::analytical::black_scholes_price;
/// use mc_engine::scenario::{MarketParams, OptionKind};
///
/// let price = black_scholes_price(&MarketParams::default(), OptionKind::Call);
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn black_scholes_price(market: &MarketParams, kind: OptionKind) -> f64 {
    let model = BlackScholes::new(market.spot_price, market.rate, market.volatility);
    match kind {
        OptionKind::Call => model.price_call(market.strike_price, market.time_to_maturity),
        OptionKind::Put => model.price_put(market.strike_price, market.time_to_maturity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_atm_reference_values() {
        // Hull, S = K = 100, r = 5%, σ = 20%, T = 1
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2);
        assert_abs_diff_eq!(bs.price_call(100.0, 1.0), 10.4506, epsilon = 1e-3);
        assert_abs_diff_eq!(bs.price_put(100.0, 1.0), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_put_call_parity() {
        let bs = BlackScholes::new(120.0_f64, 0.03, 0.35);
        for strike in [80.0, 100.0, 120.0, 150.0] {
            let lhs = bs.price_call(strike, 2.0) - bs.price_put(strike, 2.0);
            let rhs = 120.0 - strike * (-0.03_f64 * 2.0).exp();
            assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zero_volatility_is_forward_intrinsic() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0);
        let df = (-0.05_f64).exp();
        assert_abs_diff_eq!(bs.price_call(100.0, 1.0), 100.0 - 100.0 * df, epsilon = 1e-12);
        assert_eq!(bs.price_put(100.0, 1.0), 0.0);
    }

    #[test]
    fn test_price_from_market_params() {
        let market = MarketParams::new(100.0, 110.0, 0.01, 0.25, 0.5);
        let bs = BlackScholes::new(100.0, 0.01, 0.25);
        assert_eq!(
            black_scholes_price(&market, OptionKind::Put),
            bs.price_put(110.0, 0.5)
        );
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.01);
        assert_eq!(bs.volatility(), 0.25);
    }
}
