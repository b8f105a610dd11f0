//! Loss distribution of a long position in the underlying.

use super::gbm::GbmStepper;
use super::{ScenarioModel, TrialOutcome};
use crate::rng::TrialRng;
use crate::scenario::{MarketParams, RiskAnalysisConfig, Scenario};

/// Simulates `S₀ − S_T` for one unit of the underlying.
///
/// Positive outcomes are losses, negative outcomes are gains. The terminal
/// price follows the same GBM as [`OptionPricing`](super::OptionPricing).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskAnalysis {
    market: MarketParams,
    stepper: GbmStepper,
}

impl RiskAnalysis {
    /// Creates the model, prepared for single-step paths.
    pub fn new(market: MarketParams) -> Self {
        Self {
            market,
            stepper: GbmStepper::new(&market, 1),
        }
    }

    /// Prepares the path discretisation for `num_steps` increments.
    pub fn with_steps(mut self, num_steps: usize) -> Self {
        self.stepper = GbmStepper::new(&self.market, num_steps);
        self
    }
}

impl From<&RiskAnalysisConfig> for RiskAnalysis {
    fn from(config: &RiskAnalysisConfig) -> Self {
        Self::new(config.market).with_steps(config.scenario_config.num_steps())
    }
}

impl ScenarioModel for RiskAnalysis {
    const SCENARIO: Scenario = Scenario::RiskAnalysis;

    #[inline]
    fn evaluate_trial(&self, stream: &mut TrialRng, num_steps: usize) -> TrialOutcome {
        let terminal = self
            .stepper
            .for_steps(&self.market, num_steps)
            .terminal(stream);
        TrialOutcome::scalar(self.market.spot_price - terminal)
    }
}
