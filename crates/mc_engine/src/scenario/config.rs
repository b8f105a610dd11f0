//! Shared trial-control configuration.
//!
//! [`ScenarioConfig`] carries the parameters every scenario needs: how many
//! trials, how many steps per trial, how many workers and the root seed.

use crate::error::{Result, SimulationError};

/// Maximum number of trials allowed.
pub const MAX_TRIALS: usize = 100_000_000;

/// Maximum number of discretisation steps allowed per trial.
pub const MAX_STEPS: usize = 100_000;

/// Maximum number of worker threads allowed.
pub const MAX_THREADS: usize = 1_024;

/// Trial-control parameters shared by all scenarios.
///
/// Use [`ScenarioConfigBuilder`] (or [`ScenarioConfig::new`]) to construct
/// instances; both validate before returning.
///
/// # Examples
///
/// ```rust
/// use mc_engine::ScenarioConfig;
///
/// let config = ScenarioConfig::builder()
///     .num_trials(10_000)
///     .num_steps(252)
///     .num_threads(4)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.num_trials(), 10_000);
/// assert_eq!(config.seed(), 42);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    /// Default number of independent trials.
    num_trials: usize,
    /// Discretisation steps per trial.
    num_steps: usize,
    /// Upper bound on concurrent workers.
    num_threads: usize,
    /// Root of all per-trial randomness.
    seed: u64,
}

impl ScenarioConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any count is out of range.
    pub fn new(num_trials: usize, num_steps: usize, num_threads: usize, seed: u64) -> Result<Self> {
        let config = Self {
            num_trials,
            num_steps,
            num_threads,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::default()
    }

    /// Returns the default number of trials.
    #[inline]
    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    /// Returns the number of steps per trial.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the worker bound.
    #[inline]
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Returns the root seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn set_num_trials(&mut self, num_trials: usize) {
        self.num_trials = num_trials;
    }

    pub(crate) fn set_num_steps(&mut self, num_steps: usize) {
        self.num_steps = num_steps;
    }

    pub(crate) fn set_num_threads(&mut self, num_threads: usize) {
        self.num_threads = num_threads;
    }

    pub(crate) fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Validates the configuration.
    ///
    /// `num_steps = 0` is accepted: path-dependent scenarios then take a
    /// single terminal draw.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `num_trials` is 0 or greater than [`MAX_TRIALS`]
    /// - `num_steps` is greater than [`MAX_STEPS`]
    /// - `num_threads` is 0 or greater than [`MAX_THREADS`]
    pub fn validate(&self) -> Result<()> {
        if self.num_trials == 0 || self.num_trials > MAX_TRIALS {
            return Err(SimulationError::invalid_parameter(
                "num_trials",
                format!("{} is outside [1, {}]", self.num_trials, MAX_TRIALS),
            ));
        }
        if self.num_steps > MAX_STEPS {
            return Err(SimulationError::invalid_parameter(
                "num_steps",
                format!("{} exceeds {}", self.num_steps, MAX_STEPS),
            ));
        }
        if self.num_threads == 0 || self.num_threads > MAX_THREADS {
            return Err(SimulationError::invalid_parameter(
                "num_threads",
                format!("{} is outside [1, {}]", self.num_threads, MAX_THREADS),
            ));
        }
        Ok(())
    }
}

/// Builder for [`ScenarioConfig`].
///
/// `num_threads` defaults to 1; every other field must be set.
#[derive(Clone, Debug, Default)]
pub struct ScenarioConfigBuilder {
    num_trials: Option<usize>,
    num_steps: Option<usize>,
    num_threads: Option<usize>,
    seed: Option<u64>,
}

impl ScenarioConfigBuilder {
    /// Sets the number of trials.
    #[inline]
    pub fn num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = Some(num_trials);
        self
    }

    /// Sets the number of steps per trial.
    #[inline]
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.num_steps = Some(num_steps);
        self
    }

    /// Sets the worker bound.
    #[inline]
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Sets the root seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `num_trials`/`num_steps` are missing or any
    ///   count is out of range
    /// - `InvalidSeed` if no seed was given
    pub fn build(self) -> Result<ScenarioConfig> {
        let num_trials = self
            .num_trials
            .ok_or_else(|| SimulationError::invalid_parameter("num_trials", "must be specified"))?;
        let num_steps = self
            .num_steps
            .ok_or_else(|| SimulationError::invalid_parameter("num_steps", "must be specified"))?;
        let seed = self
            .seed
            .ok_or_else(|| SimulationError::InvalidSeed("seed must be specified".to_string()))?;

        ScenarioConfig::new(num_trials, num_steps, self.num_threads.unwrap_or(1), seed)
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid_parameter(
            name,
            format!("must be finite and > 0, got {}", value),
        ))
    }
}

/// Checks that `value` is finite and non-negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid_parameter(
            name,
            format!("must be finite and >= 0, got {}", value),
        ))
    }
}

/// Checks that `value` is finite.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_valid() {
        let config = ScenarioConfig::builder()
            .num_trials(10_000)
            .num_steps(252)
            .num_threads(4)
            .seed(42)
            .build()
            .unwrap();

        assert_eq!(config.num_trials(), 10_000);
        assert_eq!(config.num_steps(), 252);
        assert_eq!(config.num_threads(), 4);
        assert_eq!(config.seed(), 42);
    }

    #[test]
    fn test_config_builder_default_threads() {
        let config = ScenarioConfig::builder()
            .num_trials(10)
            .num_steps(1)
            .seed(1)
            .build()
            .unwrap();

        assert_eq!(config.num_threads(), 1);
    }

    #[test]
    fn test_config_zero_steps_accepted() {
        assert!(ScenarioConfig::new(10, 0, 1, 1).is_ok());
    }

    #[test]
    fn test_config_invalid_zero_trials() {
        let result = ScenarioConfig::new(0, 1, 1, 1);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "num_trials",
                ..
            })
        ));
    }

    #[test]
    fn test_config_invalid_zero_threads() {
        let result = ScenarioConfig::new(10, 1, 0, 1);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "num_threads",
                ..
            })
        ));
    }

    #[test]
    fn test_config_invalid_too_many_steps() {
        let result = ScenarioConfig::new(10, MAX_STEPS + 1, 1, 1);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "num_steps",
                ..
            })
        ));
    }

    #[test]
    fn test_config_missing_seed() {
        let result = ScenarioConfig::builder().num_trials(10).num_steps(1).build();
        assert!(matches!(result, Err(SimulationError::InvalidSeed(_))));
    }

    #[test]
    fn test_config_missing_trials() {
        let result = ScenarioConfig::builder().num_steps(1).seed(1).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "num_trials",
                ..
            })
        ));
    }

    #[test]
    fn test_require_helpers() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_non_negative("x", -1e-12).is_err());
        assert!(require_finite("x", -5.0).is_ok());
        assert!(require_finite("x", f64::NAN).is_err());
    }
}
