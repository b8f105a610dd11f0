//! Scenario models.
//!
//! Every model implements [`ScenarioModel::evaluate_trial`], a pure function
//! of its parameters, one trial's random stream and the step count. The
//! dispatcher is generic over the model, so the trial loop is monomorphised
//! per scenario and never goes through a trait object.
//!
//! | Model | Outcome |
//! |-------|---------|
//! | [`PiEstimation`] | 1 if the point lands in the circle, else 0 |
//! | [`OptionPricing`] | discounted European payoff |
//! | [`RandomWalk`] | terminal position (optionally the full path) |
//! | [`RiskAnalysis`] | loss `S₀ − S_T` of a long position |

mod gbm;
mod option;
mod pi;
mod random_walk;
mod risk;

pub use gbm::GbmStepper;
pub use option::OptionPricing;
pub use pi::PiEstimation;
pub use random_walk::RandomWalk;
pub use risk::RiskAnalysis;

use crate::rng::TrialRng;
use crate::scenario::Scenario;

/// Result of a single trial.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialOutcome {
    /// Scalar outcome used for aggregation.
    pub value: f64,
    /// Intermediate states, only populated when path retention is requested.
    pub path: Option<Vec<f64>>,
}

impl TrialOutcome {
    /// Creates a scalar outcome without a path.
    #[inline]
    pub fn scalar(value: f64) -> Self {
        Self { value, path: None }
    }

    /// Creates an outcome carrying its full path.
    #[inline]
    pub fn with_path(value: f64, path: Vec<f64>) -> Self {
        Self {
            value,
            path: Some(path),
        }
    }

    /// Returns `true` if the value and every path point are finite.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
            && self
                .path
                .as_ref()
                .map_or(true, |path| path.iter().all(|x| x.is_finite()))
    }
}

/// One Monte Carlo scenario.
///
/// Implementations must be pure: the outcome depends only on `self`, the
/// stream contents and `num_steps`.
pub trait ScenarioModel: Sync {
    /// Scenario tag of this model.
    const SCENARIO: Scenario;

    /// Runs one trial.
    fn evaluate_trial(&self, stream: &mut TrialRng, num_steps: usize) -> TrialOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_finiteness() {
        assert!(TrialOutcome::scalar(1.0).is_finite());
        assert!(!TrialOutcome::scalar(f64::NAN).is_finite());
        assert!(TrialOutcome::with_path(0.0, vec![0.0, 1.0]).is_finite());
        assert!(!TrialOutcome::with_path(0.0, vec![0.0, f64::INFINITY]).is_finite());
    }
}
