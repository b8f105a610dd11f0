//! Outcome aggregation.
//!
//! - [`Moments`]: mean, population standard deviation and standard error
//! - [`quantile`]: empirical quantile with linear interpolation
//! - [`risk_metrics`]: Value-at-Risk and Expected Shortfall per confidence
//!   level, loss-positive convention
//!
//! The standard deviation is the **population** one (divide by `n`), so a
//! single outcome has `std = 0` rather than an undefined sample variance.
//! Moments are accumulated with a running (Welford) update over values
//! rescaled by a power of two, so finite inputs never overflow an
//! intermediate. Values are consumed in the order given; the dispatcher
//! hands them over in trial order, which makes the reported statistics
//! bit-identical across thread counts.

/// Power of two that brings every value into `[-2, 2]`.
fn power_of_two_scale(values: &[f64]) -> f64 {
    let max_abs = values.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if max_abs == 0.0 || !max_abs.is_finite() {
        return 1.0;
    }
    let exponent = max_abs.log2().ceil().clamp(-1022.0, 1023.0) as i32;
    2.0_f64.powi(exponent)
}

/// Running moments of `values`, in slice order.
///
/// Returns `(scale, mean, m2)` where `mean` and `m2` (sum of squared
/// deviations) are in units of `scale`.
fn welford(values: &[f64]) -> (f64, f64, f64) {
    let scale = power_of_two_scale(values);
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (k, &x) in values.iter().enumerate() {
        let x = x / scale;
        let delta = x - mean;
        mean += delta / (k + 1) as f64;
        m2 += delta * (x - mean);
    }
    (scale, mean, m2)
}

/// Mean of `values`; zero for an empty slice.
fn running_mean(values: &[f64]) -> f64 {
    let (scale, mean, _) = welford(values);
    mean * scale
}

/// First and second moments of a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moments {
    /// Sample size.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl Moments {
    /// Computes the moments of `values`.
    ///
    /// An empty slice yields `n = 0`, `mean = 0`, `std = 0`. Identical values
    /// yield `std = 0` exactly.
    ///
    /// ```rust
    /// use mc_engine::stats::Moments;
    ///
    /// let m = Moments::from_samples(&[1.0, 2.0, 3.0, 4.0]);
    /// assert!((m.mean - 2.5).abs() < 1e-15);
    /// assert!((m.std - 1.25_f64.sqrt()).abs() < 1e-15);
    /// ```
    pub fn from_samples(values: &[f64]) -> Self {
        let n = values.len();
        let Some(&first) = values.first() else {
            return Self::default();
        };

        if values.iter().all(|&x| x == first) {
            return Self {
                n,
                mean: first,
                std: 0.0,
            };
        }

        let (scale, mean, m2) = welford(values);

        Self {
            n,
            mean: mean * scale,
            std: (m2 / n as f64).sqrt() * scale,
        }
    }

    /// Returns `true` if the mean and standard deviation are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.std.is_finite()
    }

    /// Standard error of the mean, `std / √n`.
    #[inline]
    pub fn std_error(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.std / (self.n as f64).sqrt()
        }
    }
}

/// Empirical quantile of an ascending-sorted sample.
///
/// Uses linear interpolation between the order statistics at
/// `p × (n − 1)`. Returns `None` for an empty sample.
///
/// ```rust
/// use mc_engine::stats::quantile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(quantile(&sorted, 0.5), Some(3.0));
/// assert_eq!(quantile(&sorted, 0.75), Some(4.0));
/// ```
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        len => {
            let rank = p.clamp(0.0, 1.0) * (len as f64 - 1.0);
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            if lo == hi {
                Some(sorted[lo])
            } else {
                let w = rank - lo as f64;
                Some(sorted[lo] + w * (sorted[hi] - sorted[lo]))
            }
        }
    }
}

/// Tail risk of a loss distribution at one confidence level.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetric {
    /// Confidence level in (0, 1).
    pub confidence: f64,
    /// Loss quantile at `confidence`.
    pub value_at_risk: f64,
    /// Mean of the losses at or beyond the VaR.
    pub expected_shortfall: f64,
}

/// Computes VaR / ES for each confidence level.
///
/// `losses` use the loss-positive convention. Values are not floored at
/// zero: a distribution of gains reports a negative VaR. Returns an empty
/// vector for an empty sample.
pub fn risk_metrics(losses: &[f64], confidence_levels: &[f64]) -> Vec<RiskMetric> {
    let mut sorted = losses.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    confidence_levels
        .iter()
        .filter_map(|&confidence| {
            let value_at_risk = quantile(&sorted, confidence)?;
            let tail = &sorted[sorted.partition_point(|&x| x < value_at_risk)..];
            let expected_shortfall = if tail.is_empty() {
                value_at_risk
            } else {
                running_mean(tail)
            };
            Some(RiskMetric {
                confidence,
                value_at_risk,
                expected_shortfall,
            })
        })
        .collect()
}
