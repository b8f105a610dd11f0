//! π estimation by uniform sampling.

use super::{ScenarioModel, TrialOutcome};
use crate::rng::TrialRng;
use crate::scenario::{PiEstimationConfig, Scenario};

/// Hit-or-miss π estimator.
///
/// Each trial draws one point uniformly from `[-r, r]²`. The hit ratio
/// estimates `π r² / (2r)² = π / 4` for any radius, so the point is drawn
/// in units of `r` and tested against the unit circle. Any finite positive
/// radius is then safe from overflow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiEstimation {
    radius: f64,
}

impl PiEstimation {
    /// Creates the model for a circle of the given radius.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Circle radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl From<&PiEstimationConfig> for PiEstimation {
    fn from(config: &PiEstimationConfig) -> Self {
        Self::new(config.radius)
    }
}

impl ScenarioModel for PiEstimation {
    const SCENARIO: Scenario = Scenario::PiEstimation;

    /// `num_steps` is ignored: a trial is a single draw pair.
    #[inline]
    fn evaluate_trial(&self, stream: &mut TrialRng, _num_steps: usize) -> TrialOutcome {
        // (x/r, y/r) in [-1, 1)²
        let u = stream.gen_range(-1.0, 1.0);
        let v = stream.gen_range(-1.0, 1.0);

        let inside = u * u + v * v <= 1.0;
        TrialOutcome::scalar(if inside { 1.0 } else { 0.0 })
    }
}
