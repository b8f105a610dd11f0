//! European option pricing under GBM.

use super::gbm::GbmStepper;
use super::{ScenarioModel, TrialOutcome};
use crate::rng::TrialRng;
use crate::scenario::{MarketParams, OptionKind, OptionPricingConfig, Scenario};

/// Discounted European payoff of one simulated path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionPricing {
    market: MarketParams,
    kind: OptionKind,
    discount_factor: f64,
    stepper: GbmStepper,
}

impl OptionPricing {
    /// Creates the model, prepared for single-step paths.
    pub fn new(market: MarketParams, kind: OptionKind) -> Self {
        Self {
            market,
            kind,
            discount_factor: market.discount_factor(),
            stepper: GbmStepper::new(&market, 1),
        }
    }

    /// Prepares the path discretisation for `num_steps` increments.
    pub fn with_steps(mut self, num_steps: usize) -> Self {
        self.stepper = GbmStepper::new(&self.market, num_steps);
        self
    }
}

impl From<&OptionPricingConfig> for OptionPricing {
    fn from(config: &OptionPricingConfig) -> Self {
        Self::new(config.market, config.option_kind)
            .with_steps(config.scenario_config.num_steps())
    }
}

impl ScenarioModel for OptionPricing {
    const SCENARIO: Scenario = Scenario::OptionPricing;

    #[inline]
    fn evaluate_trial(&self, stream: &mut TrialRng, num_steps: usize) -> TrialOutcome {
        let terminal = self
            .stepper
            .for_steps(&self.market, num_steps)
            .terminal(stream);
        let payoff = self.kind.payoff(terminal, self.market.strike_price);
        TrialOutcome::scalar(payoff * self.discount_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_payoff_non_negative() {
        let model = OptionPricing::new(MarketParams::default(), OptionKind::Call);
        let mut rng = TrialRng::from_seed(11);
        for _ in 0..1_000 {
            assert!(model.evaluate_trial(&mut rng, 10).value >= 0.0);
        }
    }

    #[test]
    fn test_zero_volatility_intrinsic_value() {
        // Forward = 100 e^{0.05}, discounted call = 100 - 90 e^{-0.05}
        let market = MarketParams::new(100.0, 90.0, 0.05, 0.0, 1.0);
        let model = OptionPricing::new(market, OptionKind::Call);
        let value = model.evaluate_trial(&mut TrialRng::from_seed(1), 4).value;
        assert_relative_eq!(value, 100.0 - 90.0 * (-0.05_f64).exp(), max_relative = 1e-12);

        let put = OptionPricing::new(market, OptionKind::Put);
        assert_eq!(put.evaluate_trial(&mut TrialRng::from_seed(1), 4).value, 0.0);
    }

    #[test]
    fn test_prepared_steps_match_fresh_model() {
        let market = MarketParams::default();
        let prepared = OptionPricing::new(market, OptionKind::Call).with_steps(24);
        let fresh = OptionPricing::new(market, OptionKind::Call);

        for seed in 0..50 {
            assert_eq!(
                prepared.evaluate_trial(&mut TrialRng::from_seed(seed), 24),
                fresh.evaluate_trial(&mut TrialRng::from_seed(seed), 24)
            );
        }
    }

    #[test]
    fn test_zero_steps_does_not_panic() {
        let model = OptionPricing::new(MarketParams::default(), OptionKind::Put);
        let outcome = model.evaluate_trial(&mut TrialRng::from_seed(1), 0);
        assert!(outcome.value.is_finite());
    }
}
