//! Scenario tags and their configuration.
//!
//! A [`Scenario`] selects one of the four simulation models. Its parameters
//! travel in the matching [`ScenarioSpecificConfig`] variant, each of which
//! embeds the shared trial controls ([`ScenarioConfig`]).
//!
//! ```text
//! ScenarioSpecificConfig
//! ├── PiEstimation(PiEstimationConfig)
//! ├── OptionPricing(OptionPricingConfig)
//! ├── RandomWalk(RandomWalkConfig)
//! └── RiskAnalysis(RiskAnalysisConfig)
//!         └── ScenarioConfig (num_trials, num_steps, num_threads, seed)
//! ```

pub mod config;
pub mod specific;
pub mod update;

use std::fmt;
use std::str::FromStr;

use crate::error::SimulationError;

pub use config::{ScenarioConfig, ScenarioConfigBuilder, MAX_STEPS, MAX_THREADS, MAX_TRIALS};
pub use specific::{
    MarketParams, OptionKind, OptionPricingConfig, PiEstimationConfig, RandomWalkConfig,
    RiskAnalysisConfig, ScenarioSpecificConfig, DEFAULT_CONFIDENCE_LEVELS,
};
pub use update::{
    MarketUpdate, OptionPricingUpdate, ParamsUpdate, PiEstimationUpdate, RandomWalkUpdate,
    RiskAnalysisUpdate, TrialUpdate,
};

/// Simulation scenario selector.
///
/// Fixed for the lifetime of a [`MonteCarloEngine`](crate::MonteCarloEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Scenario {
    /// Estimate π from uniform points in a square.
    PiEstimation,
    /// Price a European option under geometric Brownian motion.
    OptionPricing,
    /// Simulate a discrete ±step random walk.
    RandomWalk,
    /// Simulate the loss distribution of a position in the underlying.
    RiskAnalysis,
}

impl Scenario {
    /// All scenarios, in declaration order.
    pub const ALL: [Scenario; 4] = [
        Scenario::PiEstimation,
        Scenario::OptionPricing,
        Scenario::RandomWalk,
        Scenario::RiskAnalysis,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::PiEstimation => "pi-estimation",
            Scenario::OptionPricing => "option-pricing",
            Scenario::RandomWalk => "random-walk",
            Scenario::RiskAnalysis => "risk-analysis",
        }
    }

    /// Whether trial cost scales with `num_steps`.
    pub fn is_path_dependent(&self) -> bool {
        !matches!(self, Scenario::PiEstimation)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pi-estimation" | "piestimation" | "pi" => Ok(Scenario::PiEstimation),
            "option-pricing" | "optionpricing" | "option" => Ok(Scenario::OptionPricing),
            "random-walk" | "randomwalk" | "walk" => Ok(Scenario::RandomWalk),
            "risk-analysis" | "riskanalysis" | "risk" => Ok(Scenario::RiskAnalysis),
            other => Err(SimulationError::invalid_parameter(
                "scenario",
                format!(
                    "unknown scenario '{}'; expected one of pi, option, walk, risk",
                    other
                ),
            )),
        }
    }
}
