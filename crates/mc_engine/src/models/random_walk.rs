//! Discrete random walk.

use super::{ScenarioModel, TrialOutcome};
use crate::rng::TrialRng;
use crate::scenario::{RandomWalkConfig, Scenario};

/// Walk of `±step_size` increments starting at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomWalk {
    step_size: f64,
    up_probability: f64,
    retain_paths: bool,
}

impl RandomWalk {
    /// Unbiased unit-step walk.
    pub fn unbiased() -> Self {
        Self::new(1.0, 0.5, false)
    }

    /// Creates a walk with explicit increment, bias and path retention.
    pub fn new(step_size: f64, up_probability: f64, retain_paths: bool) -> Self {
        Self {
            step_size,
            up_probability,
            retain_paths,
        }
    }

    #[inline]
    fn increment(&self, stream: &mut TrialRng) -> f64 {
        if stream.gen_bernoulli(self.up_probability) {
            self.step_size
        } else {
            -self.step_size
        }
    }
}

impl From<&RandomWalkConfig> for RandomWalk {
    fn from(config: &RandomWalkConfig) -> Self {
        Self::new(config.step_size, config.up_probability, config.retain_paths)
    }
}

impl ScenarioModel for RandomWalk {
    const SCENARIO: Scenario = Scenario::RandomWalk;

    fn evaluate_trial(&self, stream: &mut TrialRng, num_steps: usize) -> TrialOutcome {
        if self.retain_paths {
            let mut path = Vec::with_capacity(num_steps + 1);
            let mut position = 0.0;
            path.push(position);
            for _ in 0..num_steps {
                position += self.increment(stream);
                path.push(position);
            }
            TrialOutcome::with_path(position, path)
        } else {
            let position: f64 = (0..num_steps).map(|_| self.increment(stream)).sum();
            TrialOutcome::scalar(position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_steps_stays_at_origin() {
        let outcome = RandomWalk::unbiased().evaluate_trial(&mut TrialRng::from_seed(1), 0);
        assert_eq!(outcome, TrialOutcome::scalar(0.0));
    }

    #[test]
    fn test_parity_of_terminal_position() {
        // An n-step unit walk ends at a position with the parity of n.
        let model = RandomWalk::unbiased();
        let mut rng = TrialRng::from_seed(17);
        for _ in 0..200 {
            let position = model.evaluate_trial(&mut rng, 11).value;
            assert_eq!(position.abs() as i64 % 2, 1);
            assert!(position.abs() <= 11.0);
        }
    }

    #[test]
    fn test_fully_biased_walk() {
        let up = RandomWalk::new(0.5, 1.0, false);
        let down = RandomWalk::new(0.5, 0.0, false);
        let mut rng = TrialRng::from_seed(3);
        assert_eq!(up.evaluate_trial(&mut rng, 20).value, 10.0);
        assert_eq!(down.evaluate_trial(&mut rng, 20).value, -10.0);
    }

    #[test]
    fn test_retained_path_matches_terminal() {
        let scalar = RandomWalk::new(1.0, 0.5, false);
        let with_path = RandomWalk::new(1.0, 0.5, true);

        let a = scalar.evaluate_trial(&mut TrialRng::from_seed(8), 25);
        let b = with_path.evaluate_trial(&mut TrialRng::from_seed(8), 25);

        assert_eq!(a.value, b.value);
        let path = b.path.expect("path retained");
        assert_eq!(path.len(), 26);
        assert_eq!(path[0], 0.0);
        assert_eq!(*path.last().unwrap(), b.value);
        assert!(path.windows(2).all(|w| (w[1] - w[0]).abs() == 1.0));
    }
}
