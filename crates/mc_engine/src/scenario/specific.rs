//! Scenario-specific configuration payloads.
//!
//! Each payload embeds the shared [`ScenarioConfig`] and adds the fields its
//! model needs. [`ScenarioSpecificConfig`] is the closed sum over the four.

use super::config::{require_finite, require_non_negative, require_positive, ScenarioConfig};
use super::Scenario;
use crate::error::{Result, SimulationError};

/// Confidence levels used for risk metrics when none are configured.
pub const DEFAULT_CONFIDENCE_LEVELS: [f64; 2] = [0.95, 0.99];

/// Parameters for the π estimation scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiEstimationConfig {
    /// Shared trial controls.
    pub scenario_config: ScenarioConfig,
    /// Circle radius; points are drawn from `[-radius, radius]²`. Any
    /// finite positive value is accepted.
    pub radius: f64,
    /// Desired output precision. Only affects reporting.
    pub precision: f64,
}

impl PiEstimationConfig {
    /// Creates a new π estimation config.
    pub fn new(scenario_config: ScenarioConfig, radius: f64, precision: f64) -> Self {
        Self {
            scenario_config,
            radius,
            precision,
        }
    }

    /// Number of decimals implied by `precision` (e.g. 0.01 → 2).
    pub fn decimals(&self) -> usize {
        if self.precision >= 1.0 {
            0
        } else {
            // Tolerance absorbs log10 rounding for exact powers of ten.
            (-self.precision.log10() - 1e-9).ceil().min(15.0) as usize
        }
    }

    fn validate(&self) -> Result<()> {
        require_positive("radius", self.radius)?;
        require_positive("precision", self.precision)
    }
}

/// Market inputs of a single underlying under GBM.
///
/// Shared by [`OptionPricingConfig`] and [`RiskAnalysisConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParams {
    /// Initial spot price (S₀).
    pub spot_price: f64,
    /// Strike price (K).
    pub strike_price: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub time_to_maturity: f64,
}

impl MarketParams {
    /// Creates new market parameters.
    #[inline]
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        rate: f64,
        volatility: f64,
        time_to_maturity: f64,
    ) -> Self {
        Self {
            spot_price,
            strike_price,
            rate,
            volatility,
            time_to_maturity,
        }
    }

    /// Discount factor `exp(-r T)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time_to_maturity).exp()
    }

    fn validate(&self) -> Result<()> {
        require_positive("spot_price", self.spot_price)?;
        require_positive("strike_price", self.strike_price)?;
        require_finite("rate", self.rate)?;
        require_non_negative("volatility", self.volatility)?;
        require_positive("time_to_maturity", self.time_to_maturity)
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            spot_price: 100.0,
            strike_price: 100.0,
            rate: 0.05,
            volatility: 0.2,
            time_to_maturity: 1.0,
        }
    }
}

/// Payoff direction of a European option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// `max(S_T - K, 0)`.
    #[default]
    Call,
    /// `max(K - S_T, 0)`.
    Put,
}

impl OptionKind {
    /// Undiscounted payoff at terminal price `terminal`.
    #[inline]
    pub fn payoff(&self, terminal: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (terminal - strike).max(0.0),
            OptionKind::Put => (strike - terminal).max(0.0),
        }
    }
}

/// Parameters for the European option pricing scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionPricingConfig {
    /// Shared trial controls.
    pub scenario_config: ScenarioConfig,
    /// Underlying and contract inputs.
    pub market: MarketParams,
    /// Call or put.
    pub option_kind: OptionKind,
}

impl OptionPricingConfig {
    /// Creates a call option config from the five market fields.
    pub fn new(
        scenario_config: ScenarioConfig,
        spot_price: f64,
        strike_price: f64,
        rate: f64,
        volatility: f64,
        time_to_maturity: f64,
    ) -> Self {
        Self {
            scenario_config,
            market: MarketParams::new(spot_price, strike_price, rate, volatility, time_to_maturity),
            option_kind: OptionKind::Call,
        }
    }

    /// Returns the config with the given option kind.
    pub fn with_option_kind(mut self, option_kind: OptionKind) -> Self {
        self.option_kind = option_kind;
        self
    }
}

/// Parameters for the random walk scenario.
///
/// The walk starts at 0 and moves `+step_size` with probability
/// `up_probability`, `-step_size` otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomWalkConfig {
    /// Shared trial controls.
    pub scenario_config: ScenarioConfig,
    /// Optional duplicate of `scenario_config.seed`; must match it when set.
    pub seed: Option<u64>,
    /// Magnitude of each increment.
    pub step_size: f64,
    /// Probability of an upward move (0.5 is the unbiased walk).
    pub up_probability: f64,
    /// Keep every trial's full path in the result.
    pub retain_paths: bool,
}

impl RandomWalkConfig {
    /// Creates an unbiased unit-step walk config.
    pub fn new(scenario_config: ScenarioConfig, seed: Option<u64>) -> Self {
        Self {
            scenario_config,
            seed,
            step_size: 1.0,
            up_probability: 0.5,
            retain_paths: false,
        }
    }

    /// Returns the config with a biased step distribution.
    pub fn with_bias(mut self, step_size: f64, up_probability: f64) -> Self {
        self.step_size = step_size;
        self.up_probability = up_probability;
        self
    }

    /// Returns the config with path retention switched on or off.
    pub fn with_retained_paths(mut self, retain_paths: bool) -> Self {
        self.retain_paths = retain_paths;
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(seed) = self.seed {
            if seed != self.scenario_config.seed() {
                return Err(SimulationError::InvalidSeed(format!(
                    "random walk seed {} conflicts with scenario seed {}",
                    seed,
                    self.scenario_config.seed()
                )));
            }
        }
        require_positive("step_size", self.step_size)?;
        if !(0.0..=1.0).contains(&self.up_probability) {
            return Err(SimulationError::invalid_parameter(
                "up_probability",
                format!("must be in [0, 1], got {}", self.up_probability),
            ));
        }
        Ok(())
    }
}

/// Parameters for the risk analysis scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskAnalysisConfig {
    /// Shared trial controls.
    pub scenario_config: ScenarioConfig,
    /// Underlying inputs. The strike is validated but does not enter the
    /// loss of the underlying position.
    pub market: MarketParams,
    /// Confidence levels for VaR / Expected Shortfall, each in (0, 1).
    pub confidence_levels: Vec<f64>,
}

impl RiskAnalysisConfig {
    /// Creates a risk config with the default 95% / 99% confidence levels.
    pub fn new(
        scenario_config: ScenarioConfig,
        spot_price: f64,
        strike_price: f64,
        rate: f64,
        volatility: f64,
        time_to_maturity: f64,
    ) -> Self {
        Self {
            scenario_config,
            market: MarketParams::new(spot_price, strike_price, rate, volatility, time_to_maturity),
            confidence_levels: DEFAULT_CONFIDENCE_LEVELS.to_vec(),
        }
    }

    /// Returns the config with the given confidence levels.
    pub fn with_confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    fn validate(&self) -> Result<()> {
        self.market.validate()?;
        if self.confidence_levels.is_empty() {
            return Err(SimulationError::invalid_parameter(
                "confidence_levels",
                "at least one level is required",
            ));
        }
        for &level in &self.confidence_levels {
            if !(level > 0.0 && level < 1.0) {
                return Err(SimulationError::invalid_parameter(
                    "confidence_levels",
                    format!("{} is outside (0, 1)", level),
                ));
            }
        }
        Ok(())
    }
}

/// Closed sum over the per-scenario configs.
///
/// Exactly one variant is active per engine; its embedded
/// [`ScenarioConfig`] is authoritative for trials, steps, threads and seed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScenarioSpecificConfig {
    /// π estimation payload.
    PiEstimation(PiEstimationConfig),
    /// Option pricing payload.
    OptionPricing(OptionPricingConfig),
    /// Random walk payload.
    RandomWalk(RandomWalkConfig),
    /// Risk analysis payload.
    RiskAnalysis(RiskAnalysisConfig),
}

impl ScenarioSpecificConfig {
    /// The scenario this payload belongs to.
    pub fn scenario(&self) -> Scenario {
        match self {
            Self::PiEstimation(_) => Scenario::PiEstimation,
            Self::OptionPricing(_) => Scenario::OptionPricing,
            Self::RandomWalk(_) => Scenario::RandomWalk,
            Self::RiskAnalysis(_) => Scenario::RiskAnalysis,
        }
    }

    /// The embedded trial controls.
    pub fn scenario_config(&self) -> &ScenarioConfig {
        match self {
            Self::PiEstimation(c) => &c.scenario_config,
            Self::OptionPricing(c) => &c.scenario_config,
            Self::RandomWalk(c) => &c.scenario_config,
            Self::RiskAnalysis(c) => &c.scenario_config,
        }
    }

    pub(crate) fn scenario_config_mut(&mut self) -> &mut ScenarioConfig {
        match self {
            Self::PiEstimation(c) => &mut c.scenario_config,
            Self::OptionPricing(c) => &mut c.scenario_config,
            Self::RandomWalk(c) => &mut c.scenario_config,
            Self::RiskAnalysis(c) => &mut c.scenario_config,
        }
    }

    /// Sets the root seed, keeping any duplicated seed field in step.
    pub(crate) fn set_seed(&mut self, seed: u64) {
        self.scenario_config_mut().set_seed(seed);
        if let Self::RandomWalk(c) = self {
            if c.seed.is_some() {
                c.seed = Some(seed);
            }
        }
    }

    /// Validates the trial controls and the scenario payload.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for out-of-range values, `InvalidSeed` for a
    /// random walk seed that disagrees with the scenario seed.
    pub fn validate(&self) -> Result<()> {
        self.scenario_config().validate()?;
        match self {
            Self::PiEstimation(c) => c.validate(),
            Self::OptionPricing(c) => c.market.validate(),
            Self::RandomWalk(c) => c.validate(),
            Self::RiskAnalysis(c) => c.validate(),
        }
    }
}

impl From<PiEstimationConfig> for ScenarioSpecificConfig {
    fn from(config: PiEstimationConfig) -> Self {
        Self::PiEstimation(config)
    }
}

impl From<OptionPricingConfig> for ScenarioSpecificConfig {
    fn from(config: OptionPricingConfig) -> Self {
        Self::OptionPricing(config)
    }
}

impl From<RandomWalkConfig> for ScenarioSpecificConfig {
    fn from(config: RandomWalkConfig) -> Self {
        Self::RandomWalk(config)
    }
}

impl From<RiskAnalysisConfig> for ScenarioSpecificConfig {
    fn from(config: RiskAnalysisConfig) -> Self {
        Self::RiskAnalysis(config)
    }
}
