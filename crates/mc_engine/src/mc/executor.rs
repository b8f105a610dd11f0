//! Single-trial execution.

use crate::error::{Result, SimulationError};
use crate::models::{ScenarioModel, TrialOutcome};
use crate::rng::StreamFactory;

/// Runs individual trials of one model.
///
/// Stateless apart from read-only configuration, so one executor is shared
/// by reference across every worker.
#[derive(Debug)]
pub struct TrialExecutor<'a, M: ScenarioModel> {
    model: &'a M,
    streams: StreamFactory,
    num_steps: usize,
}

impl<'a, M: ScenarioModel> TrialExecutor<'a, M> {
    /// Creates an executor for `model` with the given streams and step count.
    pub fn new(model: &'a M, streams: StreamFactory, num_steps: usize) -> Self {
        Self {
            model,
            streams,
            num_steps,
        }
    }

    /// Returns the step count passed to every trial.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Runs trial `trial_index`.
    ///
    /// # Errors
    ///
    /// `TrialExecution` if the outcome (or its path) is not finite.
    pub fn execute(&self, trial_index: u64) -> Result<TrialOutcome> {
        let mut stream = self.streams.stream(trial_index);
        let outcome = self.model.evaluate_trial(&mut stream, self.num_steps);

        if outcome.is_finite() {
            Ok(outcome)
        } else {
            Err(SimulationError::TrialExecution {
                trial: trial_index,
                reason: format!(
                    "{} model produced a non-finite outcome ({})",
                    M::SCENARIO,
                    outcome.value
                ),
            })
        }
    }
}
