//! Error types for the simulation engine.
//!
//! All validation failures are raised synchronously by the call that would
//! have introduced the invalid state (`MonteCarloEngine::new`,
//! `update_params`, `run`). Only [`SimulationError::TrialExecution`],
//! [`SimulationError::Aggregation`] and [`SimulationError::WorkerPool`] can
//! surface once trials are running.

use thiserror::Error;

use crate::scenario::Scenario;

/// Errors that can occur while configuring or running a simulation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// A configuration value is malformed or out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },

    /// The supplied config variant does not belong to the engine's scenario.
    #[error("Scenario mismatch: expected {expected} config, found {found} config")]
    ScenarioMismatch {
        /// Scenario the engine was constructed for.
        expected: Scenario,
        /// Scenario of the supplied config.
        found: Scenario,
    },

    /// The seed is missing or inconsistent.
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// A trial produced a non-finite or otherwise invalid outcome.
    #[error("Trial {trial} failed: {reason}")]
    TrialExecution {
        /// Index of the failing trial.
        trial: u64,
        /// Description of the failure.
        reason: String,
    },

    /// Finite outcomes aggregated to a non-finite statistic.
    #[error("Aggregation failed: {0}")]
    Aggregation(String),

    /// The worker thread pool could not be created.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl SimulationError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for SimulationError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::WorkerPool(err.to_string())
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_parameter() {
        let err = SimulationError::invalid_parameter("volatility", "must be non-negative");
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'volatility': must be non-negative"
        );
    }

    #[test]
    fn test_error_display_scenario_mismatch() {
        let err = SimulationError::ScenarioMismatch {
            expected: Scenario::OptionPricing,
            found: Scenario::RandomWalk,
        };
        assert_eq!(
            format!("{}", err),
            "Scenario mismatch: expected option-pricing config, found random-walk config"
        );
    }

    #[test]
    fn test_error_display_trial_execution() {
        let err = SimulationError::TrialExecution {
            trial: 17,
            reason: "outcome is NaN".to_string(),
        };
        assert_eq!(format!("{}", err), "Trial 17 failed: outcome is NaN");
    }

    #[test]
    fn test_error_display_aggregation() {
        let err = SimulationError::Aggregation("mean is NaN".to_string());
        assert_eq!(format!("{}", err), "Aggregation failed: mean is NaN");
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> =
            Box::new(SimulationError::InvalidSeed("seed must be specified".to_string()));
        assert!(err.to_string().contains("seed must be specified"));
    }
}
