//! Partial parameter updates.
//!
//! A [`ParamsUpdate`] names the scenario it targets and carries only the
//! fields the caller wants to change. `None` leaves a field untouched.
//! [`ParamsUpdate::Trial`] targets the shared trial controls of any scenario.

use super::config::ScenarioConfig;
use super::specific::{MarketParams, OptionKind, ScenarioSpecificConfig};
use super::Scenario;
use crate::error::{Result, SimulationError};

/// Changes to the shared trial controls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrialUpdate {
    /// New default trial count.
    pub num_trials: Option<usize>,
    /// New steps per trial.
    pub num_steps: Option<usize>,
    /// New worker bound.
    pub num_threads: Option<usize>,
    /// New root seed.
    pub seed: Option<u64>,
}

impl TrialUpdate {
    fn apply(&self, config: &mut ScenarioConfig) {
        if let Some(num_trials) = self.num_trials {
            config.set_num_trials(num_trials);
        }
        if let Some(num_steps) = self.num_steps {
            config.set_num_steps(num_steps);
        }
        if let Some(num_threads) = self.num_threads {
            config.set_num_threads(num_threads);
        }
        if let Some(seed) = self.seed {
            config.set_seed(seed);
        }
    }
}

/// Changes to the GBM market inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketUpdate {
    /// New spot price.
    pub spot_price: Option<f64>,
    /// New strike price.
    pub strike_price: Option<f64>,
    /// New rate.
    pub rate: Option<f64>,
    /// New volatility.
    pub volatility: Option<f64>,
    /// New time to maturity.
    pub time_to_maturity: Option<f64>,
}

impl MarketUpdate {
    fn apply(&self, market: &mut MarketParams) {
        if let Some(v) = self.spot_price {
            market.spot_price = v;
        }
        if let Some(v) = self.strike_price {
            market.strike_price = v;
        }
        if let Some(v) = self.rate {
            market.rate = v;
        }
        if let Some(v) = self.volatility {
            market.volatility = v;
        }
        if let Some(v) = self.time_to_maturity {
            market.time_to_maturity = v;
        }
    }
}

/// Update for [`PiEstimationConfig`](super::PiEstimationConfig).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PiEstimationUpdate {
    /// Trial control changes.
    pub trial: TrialUpdate,
    /// New radius.
    pub radius: Option<f64>,
    /// New precision.
    pub precision: Option<f64>,
}

/// Update for [`OptionPricingConfig`](super::OptionPricingConfig).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionPricingUpdate {
    /// Trial control changes.
    pub trial: TrialUpdate,
    /// Market input changes.
    pub market: MarketUpdate,
    /// New option kind.
    pub option_kind: Option<OptionKind>,
}

/// Update for [`RandomWalkConfig`](super::RandomWalkConfig).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RandomWalkUpdate {
    /// Trial control changes.
    pub trial: TrialUpdate,
    /// New duplicated seed.
    pub seed: Option<u64>,
    /// New step size.
    pub step_size: Option<f64>,
    /// New upward probability.
    pub up_probability: Option<f64>,
    /// New path retention flag.
    pub retain_paths: Option<bool>,
}

/// Update for [`RiskAnalysisConfig`](super::RiskAnalysisConfig).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskAnalysisUpdate {
    /// Trial control changes.
    pub trial: TrialUpdate,
    /// Market input changes.
    pub market: MarketUpdate,
    /// New confidence levels.
    pub confidence_levels: Option<Vec<f64>>,
}

/// A partial config change for one scenario.
///
/// # Examples
///
/// ```rust
/// use mc_engine::{OptionPricingUpdate, MarketUpdate, ParamsUpdate};
///
/// let update = ParamsUpdate::OptionPricing(OptionPricingUpdate {
///     market: MarketUpdate {
///         volatility: Some(0.3),
///         ..Default::default()
///     },
///     ..Default::default()
/// });
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ParamsUpdate {
    /// Trial controls only; valid for every scenario.
    Trial(TrialUpdate),
    /// π estimation update.
    PiEstimation(PiEstimationUpdate),
    /// Option pricing update.
    OptionPricing(OptionPricingUpdate),
    /// Random walk update.
    RandomWalk(RandomWalkUpdate),
    /// Risk analysis update.
    RiskAnalysis(RiskAnalysisUpdate),
}

impl ParamsUpdate {
    /// Scenario targeted by this update, `None` for [`ParamsUpdate::Trial`].
    pub fn scenario(&self) -> Option<Scenario> {
        match self {
            Self::Trial(_) => None,
            Self::PiEstimation(_) => Some(Scenario::PiEstimation),
            Self::OptionPricing(_) => Some(Scenario::OptionPricing),
            Self::RandomWalk(_) => Some(Scenario::RandomWalk),
            Self::RiskAnalysis(_) => Some(Scenario::RiskAnalysis),
        }
    }

    /// Writes the update into `config` without validating the result.
    ///
    /// # Errors
    ///
    /// `ScenarioMismatch` if the update targets another scenario; `config`
    /// is untouched in that case.
    pub(crate) fn apply_to(&self, config: &mut ScenarioSpecificConfig) -> Result<()> {
        match (self, config) {
            (Self::Trial(u), c) => u.apply(c.scenario_config_mut()),
            (Self::PiEstimation(u), ScenarioSpecificConfig::PiEstimation(c)) => {
                u.trial.apply(&mut c.scenario_config);
                if let Some(v) = u.radius {
                    c.radius = v;
                }
                if let Some(v) = u.precision {
                    c.precision = v;
                }
            }
            (Self::OptionPricing(u), ScenarioSpecificConfig::OptionPricing(c)) => {
                u.trial.apply(&mut c.scenario_config);
                u.market.apply(&mut c.market);
                if let Some(kind) = u.option_kind {
                    c.option_kind = kind;
                }
            }
            (Self::RandomWalk(u), ScenarioSpecificConfig::RandomWalk(c)) => {
                u.trial.apply(&mut c.scenario_config);
                if u.seed.is_some() {
                    c.seed = u.seed;
                }
                if let Some(v) = u.step_size {
                    c.step_size = v;
                }
                if let Some(v) = u.up_probability {
                    c.up_probability = v;
                }
                if let Some(v) = u.retain_paths {
                    c.retain_paths = v;
                }
            }
            (Self::RiskAnalysis(u), ScenarioSpecificConfig::RiskAnalysis(c)) => {
                u.trial.apply(&mut c.scenario_config);
                u.market.apply(&mut c.market);
                if let Some(levels) = &u.confidence_levels {
                    c.confidence_levels = levels.clone();
                }
            }
            (update, config) => {
                return Err(SimulationError::ScenarioMismatch {
                    expected: config.scenario(),
                    // Trial updates match every scenario and are handled above.
                    found: update.scenario().unwrap_or(config.scenario()),
                });
            }
        }
        Ok(())
    }
}

impl From<TrialUpdate> for ParamsUpdate {
    fn from(update: TrialUpdate) -> Self {
        Self::Trial(update)
    }
}

impl From<PiEstimationUpdate> for ParamsUpdate {
    fn from(update: PiEstimationUpdate) -> Self {
        Self::PiEstimation(update)
    }
}

impl From<OptionPricingUpdate> for ParamsUpdate {
    fn from(update: OptionPricingUpdate) -> Self {
        Self::OptionPricing(update)
    }
}

impl From<RandomWalkUpdate> for ParamsUpdate {
    fn from(update: RandomWalkUpdate) -> Self {
        Self::RandomWalk(update)
    }
}

impl From<RiskAnalysisUpdate> for ParamsUpdate {
    fn from(update: RiskAnalysisUpdate) -> Self {
        Self::RiskAnalysis(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{OptionPricingConfig, PiEstimationConfig};

    fn option_config() -> ScenarioSpecificConfig {
        OptionPricingConfig::new(
            ScenarioConfig::new(100, 10, 2, 7).unwrap(),
            100.0,
            100.0,
            0.05,
            0.2,
            1.0,
        )
        .into()
    }

    #[test]
    fn test_partial_market_update() {
        let mut config = option_config();
        let update = ParamsUpdate::OptionPricing(OptionPricingUpdate {
            market: MarketUpdate {
                volatility: Some(0.35),
                ..Default::default()
            },
            option_kind: Some(OptionKind::Put),
            ..Default::default()
        });

        update.apply_to(&mut config).unwrap();

        let ScenarioSpecificConfig::OptionPricing(c) = &config else {
            panic!("variant changed");
        };
        assert_eq!(c.market.volatility, 0.35);
        assert_eq!(c.market.spot_price, 100.0);
        assert_eq!(c.option_kind, OptionKind::Put);
    }

    #[test]
    fn test_trial_update_applies_to_any_scenario() {
        let mut config = option_config();
        let update = ParamsUpdate::Trial(TrialUpdate {
            num_threads: Some(8),
            seed: Some(11),
            ..Default::default()
        });

        update.apply_to(&mut config).unwrap();

        assert_eq!(config.scenario_config().num_threads(), 8);
        assert_eq!(config.scenario_config().seed(), 11);
        assert_eq!(config.scenario_config().num_trials(), 100);
    }

    #[test]
    fn test_mismatched_update_rejected() {
        let mut config = option_config();
        let before = config.clone();
        let update = ParamsUpdate::PiEstimation(PiEstimationUpdate {
            radius: Some(2.0),
            ..Default::default()
        });

        let err = update.apply_to(&mut config).unwrap_err();

        assert_eq!(
            err,
            SimulationError::ScenarioMismatch {
                expected: Scenario::OptionPricing,
                found: Scenario::PiEstimation,
            }
        );
        assert_eq!(config, before);
    }

    #[test]
    fn test_pi_update() {
        let mut config: ScenarioSpecificConfig =
            PiEstimationConfig::new(ScenarioConfig::new(10, 1, 1, 1).unwrap(), 1.0, 0.01).into();
        let update = ParamsUpdate::from(PiEstimationUpdate {
            radius: Some(3.0),
            ..Default::default()
        });
        update.apply_to(&mut config).unwrap();

        let ScenarioSpecificConfig::PiEstimation(c) = &config else {
            panic!("variant changed");
        };
        assert_eq!(c.radius, 3.0);
        assert_eq!(c.precision, 0.01);
    }
}
