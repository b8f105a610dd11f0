//! Simulation results and their summaries.

use std::fmt;

use crate::error::{Result, SimulationError};
use crate::models::TrialOutcome;
use crate::scenario::Scenario;
use crate::stats::{risk_metrics, Moments, RiskMetric};

/// Decimals used in [`Summary`]'s `Display` when no precision is configured.
const DEFAULT_DECIMALS: usize = 6;

/// Outcome of one [`run`](crate::MonteCarloEngine::run).
///
/// Holds every trial outcome in trial-index order together with the derived
/// statistics. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    scenario: Scenario,
    outcomes: Vec<f64>,
    paths: Option<Vec<Vec<f64>>>,
    moments: Moments,
    risk_metrics: Option<Vec<RiskMetric>>,
    reference_price: Option<f64>,
    decimals: Option<usize>,
}

impl SimulationResult {
    /// Aggregates trial outcomes into a result.
    ///
    /// Paths are kept only if every outcome carries one.
    pub(crate) fn from_outcomes(scenario: Scenario, outcomes: Vec<TrialOutcome>) -> Self {
        let values: Vec<f64> = outcomes.iter().map(|o| o.value).collect();
        let paths = if !outcomes.is_empty() && outcomes.iter().all(|o| o.path.is_some()) {
            Some(outcomes.into_iter().filter_map(|o| o.path).collect())
        } else {
            None
        };
        let moments = Moments::from_samples(&values);

        Self {
            scenario,
            outcomes: values,
            paths,
            moments,
            risk_metrics: None,
            reference_price: None,
            decimals: None,
        }
    }

    /// Rejects a result whose mean or standard deviation is not finite.
    pub(crate) fn ensure_finite(self) -> Result<Self> {
        if self.moments.is_finite() {
            Ok(self)
        } else {
            Err(SimulationError::Aggregation(format!(
                "{} outcomes aggregated to mean {} and std {}",
                self.scenario, self.moments.mean, self.moments.std
            )))
        }
    }

    /// Derives VaR / ES from the outcomes, read as losses.
    pub(crate) fn with_risk_metrics(mut self, confidence_levels: &[f64]) -> Self {
        self.risk_metrics = Some(risk_metrics(&self.outcomes, confidence_levels));
        self
    }

    pub(crate) fn with_reference_price(mut self, price: f64) -> Self {
        self.reference_price = Some(price);
        self
    }

    pub(crate) fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Scenario that produced this result.
    #[inline]
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Trial outcomes in trial-index order.
    #[inline]
    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    /// Retained random walk paths, one per trial.
    #[inline]
    pub fn paths(&self) -> Option<&[Vec<f64>]> {
        self.paths.as_deref()
    }

    /// Number of outcomes.
    #[inline]
    pub fn n(&self) -> usize {
        self.moments.n
    }

    /// Mean outcome.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.moments.mean
    }

    /// Population standard deviation of the outcomes.
    #[inline]
    pub fn std(&self) -> f64 {
        self.moments.std
    }

    /// Standard error of the mean.
    #[inline]
    pub fn std_error(&self) -> f64 {
        self.moments.std_error()
    }

    /// Risk metrics, present for the risk analysis scenario.
    #[inline]
    pub fn risk_metrics(&self) -> Option<&[RiskMetric]> {
        self.risk_metrics.as_deref()
    }

    /// Closed-form price, present for the option pricing scenario.
    #[inline]
    pub fn reference_price(&self) -> Option<f64> {
        self.reference_price
    }

    /// Scenario-specific headline number.
    ///
    /// `4 × mean` for π estimation; the mean otherwise (option price,
    /// expected terminal position, expected loss).
    pub fn estimate(&self) -> f64 {
        match self.scenario {
            Scenario::PiEstimation => 4.0 * self.moments.mean,
            Scenario::OptionPricing | Scenario::RandomWalk | Scenario::RiskAnalysis => {
                self.moments.mean
            }
        }
    }

    /// Condensed view of the result.
    pub fn summary(&self) -> Summary {
        Summary {
            scenario: self.scenario,
            n: self.moments.n,
            mean: self.moments.mean,
            std: self.moments.std,
            std_error: self.moments.std_error(),
            estimate: self.estimate(),
            reference_price: self.reference_price,
            risk_metrics: self.risk_metrics.clone(),
            decimals: self.decimals,
        }
    }
}

/// Summary statistics of a [`SimulationResult`].
///
/// `Display` renders an aligned two-column table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Scenario that produced the result.
    pub scenario: Scenario,
    /// Number of trials.
    pub n: usize,
    /// Mean outcome.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// Scenario-specific headline number.
    pub estimate: f64,
    /// Black-Scholes price (option pricing only).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub reference_price: Option<f64>,
    /// VaR / ES per confidence level (risk analysis only).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub risk_metrics: Option<Vec<RiskMetric>>,
    /// Reporting precision derived from the π precision setting.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub decimals: Option<usize>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.decimals.unwrap_or(DEFAULT_DECIMALS);

        writeln!(f, "{:<16}{}", "scenario", self.scenario)?;
        writeln!(f, "{:<16}{}", "trials", self.n)?;
        writeln!(f, "{:<16}{:.6}", "mean", self.mean)?;
        writeln!(f, "{:<16}{:.6}", "std", self.std)?;
        writeln!(f, "{:<16}{:.6}", "std error", self.std_error)?;
        write!(f, "{:<16}{:.*}", "estimate", dp, self.estimate)?;

        if let Some(price) = self.reference_price {
            write!(f, "\n{:<16}{:.6}", "black-scholes", price)?;
        }
        for metric in self.risk_metrics.iter().flatten() {
            let pct = metric.confidence * 100.0;
            write!(f, "\n{:<16}{:.6}", format!("VaR {}%", pct), metric.value_at_risk)?;
            write!(f, "\n{:<16}{:.6}", format!("ES {}%", pct), metric.expected_shortfall)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scalars(values: &[f64]) -> Vec<TrialOutcome> {
        values.iter().copied().map(TrialOutcome::scalar).collect()
    }

    #[test]
    fn test_pi_estimate_is_four_times_mean() {
        let result =
            SimulationResult::from_outcomes(Scenario::PiEstimation, scalars(&[1.0, 1.0, 1.0, 0.0]));
        assert_eq!(result.n(), 4);
        assert_eq!(result.mean(), 0.75);
        assert_eq!(result.estimate(), 3.0);
        assert!(result.paths().is_none());
        assert!(result.risk_metrics().is_none());
    }

    #[test]
    fn test_summary_fields() {
        let result = SimulationResult::from_outcomes(Scenario::OptionPricing, scalars(&[2.0, 4.0]))
            .with_reference_price(3.1);
        let summary = result.summary();

        assert_eq!(summary.scenario, Scenario::OptionPricing);
        assert_eq!(summary.n, 2);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.std, 1.0);
        assert_relative_eq!(summary.std_error, 1.0 / 2f64.sqrt());
        assert_eq!(summary.estimate, 3.0);
        assert_eq!(summary.reference_price, Some(3.1));
    }

    #[test]
    fn test_paths_retained_only_when_complete() {
        let outcomes = vec![
            TrialOutcome::with_path(1.0, vec![0.0, 1.0]),
            TrialOutcome::with_path(-1.0, vec![0.0, -1.0]),
        ];
        let result = SimulationResult::from_outcomes(Scenario::RandomWalk, outcomes);
        assert_eq!(result.paths().map(|p| p.len()), Some(2));
        assert_eq!(result.outcomes(), &[1.0, -1.0]);
    }

    #[test]
    fn test_risk_metrics_attached() {
        let losses: Vec<f64> = (0..=100).map(f64::from).collect();
        let result = SimulationResult::from_outcomes(Scenario::RiskAnalysis, scalars(&losses))
            .with_risk_metrics(&[0.95]);
        let metrics = result.risk_metrics().unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].value_at_risk, 95.0);
    }

    #[test]
    fn test_non_finite_moments_are_rejected() {
        let err = SimulationResult::from_outcomes(Scenario::OptionPricing, scalars(&[f64::NAN, 1.0]))
            .ensure_finite()
            .unwrap_err();
        assert!(matches!(err, SimulationError::Aggregation(_)));

        let ok = SimulationResult::from_outcomes(Scenario::OptionPricing, scalars(&[1e306, 5e306]))
            .ensure_finite()
            .unwrap();
        assert_relative_eq!(ok.mean(), 3e306, max_relative = 1e-12);
    }

    #[test]
    fn test_display_uses_precision() {
        let result =
            SimulationResult::from_outcomes(Scenario::PiEstimation, scalars(&[1.0, 0.0, 1.0]))
                .with_decimals(2);
        let text = result.summary().to_string();

        assert!(text.contains("pi-estimation"));
        assert!(text.contains("estimate        2.67"));
        assert!(!text.contains("black-scholes"));
    }

    #[test]
    fn test_display_lists_risk_metrics() {
        let losses: Vec<f64> = (0..=100).map(f64::from).collect();
        let text = SimulationResult::from_outcomes(Scenario::RiskAnalysis, scalars(&losses))
            .with_risk_metrics(&[0.95, 0.99])
            .summary()
            .to_string();

        assert!(text.contains("VaR 95%"));
        assert!(text.contains("ES 99%"));
    }
}
