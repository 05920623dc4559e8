//! Winsorization and outlier-bounded averaging.
//!
//! Monthly rainfall records contain the occasional storm month that is an
//! order of magnitude above the norm. Clipping to a percentile range keeps
//! such months in the sample without letting them dominate the mean.

use crate::error::{PrecipError, Result};
use crate::utils::stats::{mean, median, percentile};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Percentile limits (as fractions) used to clip a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinsorLimits {
    pub lower: f64,
    pub upper: f64,
}

impl Default for WinsorLimits {
    fn default() -> Self {
        Self {
            lower: 0.05,
            upper: 0.95,
        }
    }
}

impl WinsorLimits {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Reject limits outside `[0, 1]` or in the wrong order.
    pub fn validate(&self) -> Result<()> {
        let in_range = |p: f64| (0.0..=1.0).contains(&p);
        if !in_range(self.lower) || !in_range(self.upper) {
            return Err(PrecipError::InvalidParameter(format!(
                "percentile limits must lie in [0, 1], got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.lower > self.upper {
            return Err(PrecipError::InvalidParameter(format!(
                "lower limit {} exceeds upper limit {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    /// Value bounds of the sample at these limits, or `None` if empty.
    pub fn bounds(&self, values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }
        Some((percentile(values, self.lower), percentile(values, self.upper)))
    }
}

/// Result of clipping a series into a percentile range.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipResult {
    pub data: Vec<f64>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Whether any value was moved.
    pub clipped: bool,
}

/// Clip every value of `series` into its own `[lower, upper]` percentile range.
pub fn clip_to_percentiles(series: &[f64], limits: &WinsorLimits) -> ClipResult {
    let Some((lower_bound, upper_bound)) = limits.bounds(series) else {
        return ClipResult {
            data: Vec::new(),
            lower_bound: f64::NAN,
            upper_bound: f64::NAN,
            clipped: false,
        };
    };

    let data: Vec<f64> = series
        .iter()
        .map(|&x| x.clamp(lower_bound, upper_bound))
        .collect();
    let clipped = data.iter().zip(series).any(|(a, b)| a != b);

    ClipResult {
        data,
        lower_bound,
        upper_bound,
        clipped,
    }
}

/// Winsorize a sample that may contain missing values.
///
/// Bounds are computed over the present values (NaN counts as missing).
/// Missing entries are replaced by the median of the present values, then
/// everything is clipped into the bounds. Output length equals input length.
/// If no value is present at all, every entry becomes `0.0`.
pub fn winsorize(values: &[Option<f64>], limits: &WinsorLimits) -> Vec<f64> {
    let present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|x| !x.is_nan())
        .collect();

    let Some((lower, upper)) = limits.bounds(&present) else {
        return vec![0.0; values.len()];
    };
    let fill = median(&present);

    values
        .iter()
        .map(|v| match v {
            Some(x) if !x.is_nan() => *x,
            _ => fill,
        })
        .map(|x| x.clamp(lower, upper))
        .collect()
}

/// Outlier-bounded, optionally weighted mean of non-negative quantities.
///
/// The sample is winsorized, negatives are raised to zero, and the result is
/// `sum(v * w) / sum(w)`. Without weights, with mismatched weights, or with a
/// zero weight sum, the plain mean is returned. Empty input yields `0.0`.
///
/// # Example
/// ```
/// use precip_forecast::transform::{robust_weighted_mean, WinsorLimits};
///
/// let m = robust_weighted_mean(&[10.0, 10.0, 10.0], Some(&[2.0, 1.0, 1.0]), &WinsorLimits::default());
/// assert_eq!(m, 10.0);
/// ```
pub fn robust_weighted_mean(values: &[f64], weights: Option<&[f64]>, limits: &WinsorLimits) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let present: Vec<Option<f64>> = values.iter().map(|&x| Some(x)).collect();
    let clipped: Vec<f64> = winsorize(&present, limits)
        .into_iter()
        .map(|x| x.max(0.0))
        .collect();

    if clipped.iter().zip(values).any(|(a, b)| a != b) {
        if let Some((lower, upper)) = limits.bounds(values) {
            info!(lower, upper, "sample clipped before averaging");
        }
    }

    let weights = match weights {
        Some(w) if w.len() == clipped.len() => w,
        _ => return mean(&clipped),
    };

    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 {
        return mean(&clipped);
    }

    clipped
        .iter()
        .zip(weights)
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / weight_sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn winsorize_clips_to_percentiles() {
        let values: Vec<Option<f64>> = [10.0, 20.0, 30.0, 40.0, 50.0].map(Some).to_vec();
        let out = winsorize(&values, &WinsorLimits::default());
        assert_eq!(out.len(), 5);
        assert_relative_eq!(out[0], 12.0, epsilon = 1e-10);
        assert_relative_eq!(out[2], 30.0, epsilon = 1e-10);
        assert_relative_eq!(out[4], 48.0, epsilon = 1e-10);
    }

    #[test]
    fn winsorize_squares_hit_interpolated_limits() {
        let values: Vec<Option<f64>> = (0..20).map(|i| Some((i * i) as f64)).collect();
        let out = winsorize(&values, &WinsorLimits::default());
        let lo = out.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = out.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(lo, 0.95, epsilon = 1e-10);
        assert_relative_eq!(hi, 325.85, epsilon = 1e-10);
        assert_eq!(out[10], 100.0);
    }

    #[test]
    fn winsorize_fills_missing_with_median() {
        let values = vec![Some(1.0), None, Some(3.0), Some(f64::NAN), Some(5.0)];
        let out = winsorize(&values, &WinsorLimits::new(0.0, 1.0));
        assert_eq!(out, vec![1.0, 3.0, 3.0, 3.0, 5.0]);
    }

    #[test]
    fn winsorize_degenerate_inputs() {
        assert!(winsorize(&[], &WinsorLimits::default()).is_empty());
        assert_eq!(winsorize(&[None, None], &WinsorLimits::default()), vec![0.0, 0.0]);
    }

    #[test]
    fn robust_mean_unweighted() {
        let m = robust_weighted_mean(&[1.0, 2.0, 3.0], None, &WinsorLimits::new(0.0, 1.0));
        assert_relative_eq!(m, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn robust_mean_weighted() {
        let m = robust_weighted_mean(
            &[10.0, 20.0],
            Some(&[3.0, 1.0]),
            &WinsorLimits::new(0.0, 1.0),
        );
        assert_relative_eq!(m, 12.5, epsilon = 1e-10);
    }

    #[test]
    fn robust_mean_zero_weights_fall_back_to_mean() {
        let m = robust_weighted_mean(
            &[10.0, 20.0],
            Some(&[0.0, 0.0]),
            &WinsorLimits::new(0.0, 1.0),
        );
        assert_relative_eq!(m, 15.0, epsilon = 1e-10);
    }

    #[test]
    fn robust_mean_clamps_negatives() {
        let m = robust_weighted_mean(&[-10.0, -5.0], None, &WinsorLimits::default());
        assert_eq!(m, 0.0);
    }

    #[test]
    fn robust_mean_dampens_outlier() {
        let values = [50.0, 55.0, 60.0, 52.0, 900.0];
        let robust = robust_weighted_mean(&values, None, &WinsorLimits::default());
        let plain = mean(&values);
        assert!(robust < plain);
        assert_eq!(robust_weighted_mean(&[], None, &WinsorLimits::default()), 0.0);
    }

    #[test]
    fn clip_reports_changes() {
        let series: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let result = clip_to_percentiles(&series, &WinsorLimits::new(0.01, 0.99));
        assert!(result.clipped);
        assert_relative_eq!(result.lower_bound, 0.99, epsilon = 1e-10);
        assert_relative_eq!(result.upper_bound, 98.01, epsilon = 1e-10);

        let flat = clip_to_percentiles(&[5.0; 10], &WinsorLimits::new(0.01, 0.99));
        assert!(!flat.clipped);
    }

    #[test]
    fn limits_validation() {
        assert!(WinsorLimits::default().validate().is_ok());
        assert!(WinsorLimits::new(0.9, 0.1).validate().is_err());
        assert!(WinsorLimits::new(-0.1, 0.5).validate().is_err());
    }
}
