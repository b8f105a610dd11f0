//! Engine facade.
//!
//! [`MonteCarloEngine`] owns the scenario tag and its configuration, and turns
//! a `run(iterations)` call into one parallel dispatch of the matching model.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► Configured ──run──► Executed
//!            ▲                   │
//!            └── set_seed / update_params / replace_config
//! ```
//!
//! Re-running is allowed in either state and always produces a fresh result.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::analytical::black_scholes_price;
use crate::error::{Result, SimulationError};
use crate::mc::{ParallelDispatcher, TrialExecutor};
use crate::models::{OptionPricing, PiEstimation, RandomWalk, RiskAnalysis, ScenarioModel};
use crate::result::SimulationResult;
use crate::rng::StreamFactory;
use crate::scenario::{ParamsUpdate, Scenario, ScenarioSpecificConfig, MAX_TRIALS};

/// Lifecycle state of a [`MonteCarloEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Configuration changed since the last run, or no run yet.
    Configured,
    /// A run completed with the current configuration.
    Executed,
}

/// Parallel Monte Carlo engine for one scenario.
///
/// # Examples
///
/// ```rust
/// use mc_engine::{MonteCarloEngine, PiEstimationConfig, Scenario, ScenarioConfig};
///
/// let trials = ScenarioConfig::new(10_000, 1, 4, 42).unwrap();
/// let config = PiEstimationConfig::new(trials, 1.0, 0.01);
/// let engine = MonteCarloEngine::new(Scenario::PiEstimation, config.into()).unwrap();
///
/// let result = engine.run(10_000).unwrap();
/// assert_eq!(result.n(), 10_000);
/// assert!((result.estimate() - std::f64::consts::PI).abs() < 0.1);
/// ```
#[derive(Debug)]
pub struct MonteCarloEngine {
    scenario: Scenario,
    config: ScenarioSpecificConfig,
    executed: AtomicBool,
}

impl Clone for MonteCarloEngine {
    fn clone(&self) -> Self {
        Self {
            scenario: self.scenario,
            config: self.config.clone(),
            executed: AtomicBool::new(self.executed.load(Ordering::Acquire)),
        }
    }
}

impl MonteCarloEngine {
    /// Creates an engine for `scenario`.
    ///
    /// # Errors
    ///
    /// - `ScenarioMismatch` if `config` belongs to another scenario
    /// - `InvalidParameter` / `InvalidSeed` if `config` fails validation
    pub fn new(scenario: Scenario, config: ScenarioSpecificConfig) -> Result<Self> {
        check_scenario(scenario, &config)?;
        config.validate()?;

        Ok(Self {
            scenario,
            config,
            executed: AtomicBool::new(false),
        })
    }

    /// The scenario this engine simulates.
    #[inline]
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// The current configuration.
    #[inline]
    pub fn config(&self) -> &ScenarioSpecificConfig {
        &self.config
    }

    /// The root seed used by the next run.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.config.scenario_config().seed()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        if self.executed.load(Ordering::Acquire) {
            EngineState::Executed
        } else {
            EngineState::Configured
        }
    }

    /// Sets the root seed for subsequent runs.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.set_seed(seed);
        self.mark_configured();
    }

    /// Applies a partial update atomically.
    ///
    /// Either every field of `update` is applied and the result validates,
    /// or the stored configuration is left untouched.
    ///
    /// # Errors
    ///
    /// - `ScenarioMismatch` if `update` targets another scenario
    /// - `InvalidParameter` / `InvalidSeed` if the updated config is invalid
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mc_engine::{
    ///     MarketUpdate, MonteCarloEngine, OptionPricingConfig, OptionPricingUpdate,
    ///     ParamsUpdate, Scenario, ScenarioConfig,
    /// };
    ///
    /// let trials = ScenarioConfig::new(1_000, 12, 2, 7).unwrap();
    /// let config = OptionPricingConfig::new(trials, 100.0, 100.0, 0.05, 0.2, 1.0);
    /// let mut engine = MonteCarloEngine::new(Scenario::OptionPricing, config.into()).unwrap();
    ///
    /// let bad = OptionPricingUpdate {
    ///     market: MarketUpdate { volatility: Some(-0.1), ..Default::default() },
    ///     ..Default::default()
    /// };
    /// assert!(engine.update_params(ParamsUpdate::from(bad)).is_err());
    /// ```
    pub fn update_params(&mut self, update: ParamsUpdate) -> Result<()> {
        let mut candidate = self.config.clone();
        update.apply_to(&mut candidate)?;
        candidate.validate()?;

        self.config = candidate;
        self.mark_configured();
        Ok(())
    }

    /// Replaces the whole configuration.
    ///
    /// # Errors
    ///
    /// Same as [`MonteCarloEngine::new`]; the engine is unchanged on error.
    pub fn replace_config(&mut self, config: ScenarioSpecificConfig) -> Result<()> {
        check_scenario(self.scenario, &config)?;
        config.validate()?;

        self.config = config;
        self.mark_configured();
        Ok(())
    }

    /// Runs `iterations` trials and aggregates them.
    ///
    /// `iterations` overrides the configured `num_trials` for this run; the
    /// worker count is `min(num_threads, iterations)`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `iterations` is 0 or above [`MAX_TRIALS`]
    /// - `TrialExecution` if any trial yields a non-finite outcome
    /// - `WorkerPool` if the thread pool cannot be built
    pub fn run(&self, iterations: usize) -> Result<SimulationResult> {
        if iterations == 0 || iterations > MAX_TRIALS {
            return Err(SimulationError::invalid_parameter(
                "iterations",
                format!("must be in [1, {}], got {}", MAX_TRIALS, iterations),
            ));
        }

        let trials = self.config.scenario_config();
        let streams = StreamFactory::new(trials.seed());
        let dispatcher = ParallelDispatcher::new(trials.num_threads());

        debug!(
            scenario = %self.scenario,
            iterations,
            workers = dispatcher.worker_count(iterations),
            seed = trials.seed(),
            "Starting simulation run"
        );

        let result = match &self.config {
            ScenarioSpecificConfig::PiEstimation(c) => self
                .run_model(&PiEstimation::from(c), streams, dispatcher, iterations)?
                .with_decimals(c.decimals()),
            ScenarioSpecificConfig::OptionPricing(c) => self
                .run_model(&OptionPricing::from(c), streams, dispatcher, iterations)?
                .with_reference_price(black_scholes_price(&c.market, c.option_kind)),
            ScenarioSpecificConfig::RandomWalk(c) => {
                self.run_model(&RandomWalk::from(c), streams, dispatcher, iterations)?
            }
            ScenarioSpecificConfig::RiskAnalysis(c) => self
                .run_model(&RiskAnalysis::from(c), streams, dispatcher, iterations)?
                .with_risk_metrics(&c.confidence_levels),
        };

        self.executed.store(true, Ordering::Release);
        debug!(
            n = result.n(),
            mean = result.mean(),
            std = result.std(),
            "Simulation run complete"
        );
        Ok(result)
    }

    /// Runs the configured `num_trials`.
    pub fn run_configured(&self) -> Result<SimulationResult> {
        self.run(self.config.scenario_config().num_trials())
    }

    fn run_model<M: ScenarioModel>(
        &self,
        model: &M,
        streams: StreamFactory,
        dispatcher: ParallelDispatcher,
        iterations: usize,
    ) -> Result<SimulationResult> {
        let executor = TrialExecutor::new(model, streams, self.config.scenario_config().num_steps());
        let outcomes = dispatcher.dispatch(&executor, iterations)?;
        SimulationResult::from_outcomes(M::SCENARIO, outcomes).ensure_finite()
    }

    fn mark_configured(&self) {
        self.executed.store(false, Ordering::Release);
    }
}

fn check_scenario(scenario: Scenario, config: &ScenarioSpecificConfig) -> Result<()> {
    let found = config.scenario();
    if found == scenario {
        Ok(())
    } else {
        Err(SimulationError::ScenarioMismatch {
            expected: scenario,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{
        OptionPricingConfig, PiEstimationConfig, RandomWalkConfig, RandomWalkUpdate, ScenarioConfig,
        TrialUpdate,
    };

    fn pi_engine(threads: usize) -> MonteCarloEngine {
        let trials = ScenarioConfig::new(2_000, 1, threads, 42).unwrap();
        MonteCarloEngine::new(
            Scenario::PiEstimation,
            PiEstimationConfig::new(trials, 1.0, 0.01).into(),
        )
        .unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let mut engine = pi_engine(2);
        assert_eq!(engine.state(), EngineState::Configured);

        engine.run(100).unwrap();
        assert_eq!(engine.state(), EngineState::Executed);

        engine.set_seed(7);
        assert_eq!(engine.state(), EngineState::Configured);
        assert_eq!(engine.seed(), 7);
    }

    #[test]
    fn test_failed_update_keeps_state() {
        let mut engine = pi_engine(2);
        engine.run(10).unwrap();

        let update = ParamsUpdate::Trial(TrialUpdate {
            num_threads: Some(0),
            ..Default::default()
        });
        assert!(engine.update_params(update).is_err());
        assert_eq!(engine.state(), EngineState::Executed);
        assert_eq!(engine.config().scenario_config().num_threads(), 2);
    }

    #[test]
    fn test_run_rejects_zero_iterations() {
        let err = pi_engine(1).run(0).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidParameter { name: "iterations", .. }
        ));
    }

    #[test]
    fn test_run_configured_uses_num_trials() {
        assert_eq!(pi_engine(3).run_configured().unwrap().n(), 2_000);
    }

    #[test]
    fn test_replace_config_checks_scenario() {
        let mut engine = pi_engine(1);
        let trials = ScenarioConfig::new(10, 5, 1, 1).unwrap();
        let walk = RandomWalkConfig::new(trials, None);

        let err = engine.replace_config(walk.into()).unwrap_err();
        assert_eq!(
            err,
            SimulationError::ScenarioMismatch {
                expected: Scenario::PiEstimation,
                found: Scenario::RandomWalk,
            }
        );
    }

    #[test]
    fn test_set_seed_keeps_walk_seed_in_step() {
        let trials = ScenarioConfig::new(10, 5, 1, 3).unwrap();
        let config = RandomWalkConfig::new(trials, Some(3));
        let mut engine = MonteCarloEngine::new(Scenario::RandomWalk, config.into()).unwrap();

        engine.set_seed(99);
        match engine.config() {
            ScenarioSpecificConfig::RandomWalk(c) => assert_eq!(c.seed, Some(99)),
            other => panic!("unexpected config {:?}", other),
        }

        // A conflicting duplicate seed is rejected.
        let update = RandomWalkUpdate {
            seed: Some(5),
            ..Default::default()
        };
        let err = engine.update_params(update.into()).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidSeed(_)));
    }

    #[test]
    fn test_option_result_carries_reference_price() {
        let trials = ScenarioConfig::new(100, 4, 2, 11).unwrap();
        let config = OptionPricingConfig::new(trials, 100.0, 100.0, 0.05, 0.2, 1.0);
        let engine = MonteCarloEngine::new(Scenario::OptionPricing, config.into()).unwrap();

        let result = engine.run(100).unwrap();
        let reference = result.reference_price().unwrap();
        assert!((reference - 10.4506).abs() < 1e-3);
    }

    #[test]
    fn test_clone_is_independent() {
        let engine = pi_engine(1);
        let mut copy = engine.clone();
        copy.set_seed(1);
        assert_eq!(engine.seed(), 42);
        assert_eq!(copy.seed(), 1);
    }
}
