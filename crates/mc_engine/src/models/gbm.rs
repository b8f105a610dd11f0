//! Geometric Brownian Motion terminal-price simulation.
//!
//! Log-space discretisation, exact for GBM at every grid point:
//! ```text
//! S(t+dt) = S(t) × exp((r - 0.5σ²)dt + σ√dt × Z)
//! ```
//! Increments are summed in log space and exponentiated once at the end.

use crate::rng::TrialRng;
use crate::scenario::MarketParams;

/// Precomputed per-step drift and diffusion for a fixed step count.
///
/// Built once per run by the models that use it; trials only call
/// [`terminal`](Self::terminal).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStepper {
    spot: f64,
    requested_steps: usize,
    steps: usize,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl GbmStepper {
    /// Prepares the stepper for `num_steps` increments over the maturity.
    ///
    /// `num_steps = 0` is treated as a single terminal draw, so the step
    /// size is never computed from a zero divisor.
    pub fn new(market: &MarketParams, num_steps: usize) -> Self {
        let steps = num_steps.max(1);
        let dt = market.time_to_maturity / steps as f64;
        let sigma = market.volatility;

        Self {
            spot: market.spot_price,
            requested_steps: num_steps,
            steps,
            drift_dt: (market.rate - 0.5 * sigma * sigma) * dt,
            vol_sqrt_dt: sigma * dt.sqrt(),
        }
    }

    /// Returns `self` if it was prepared for `num_steps`, otherwise a
    /// stepper rebuilt for that count.
    #[inline]
    pub fn for_steps(self, market: &MarketParams, num_steps: usize) -> Self {
        if num_steps == self.requested_steps {
            self
        } else {
            Self::new(market, num_steps)
        }
    }

    /// Number of increments actually simulated (at least one).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Simulates one path and returns its terminal price.
    #[inline]
    pub fn terminal(&self, stream: &mut TrialRng) -> f64 {
        let mut log_return = 0.0;
        for _ in 0..self.steps {
            log_return += self.drift_dt + self.vol_sqrt_dt * stream.gen_normal();
        }
        self.spot * log_return.exp()
    }
}
