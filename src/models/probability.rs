//! Rain probability and intensity derived from a monthly estimate.
//!
//! Heuristic: a month with `x` mm of rain has about `0.05 * x + 3` rainy
//! days, so 100 mm maps to 8 days and 200 mm to 13.

use crate::core::Intensity;
use crate::utils::stats::coefficient_of_variation;
use serde::{Deserialize, Serialize};

/// Constants of the probability heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbabilityConfig {
    pub rain_days_per_mm: f64,
    pub base_rain_days: f64,
    pub days_in_month: f64,
    /// Historical coefficient of variation above which the probability is penalized.
    pub cv_threshold: f64,
    pub cv_penalty: f64,
    /// Added (capped at 100) for torrential estimates.
    pub torrential_bonus: f64,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            rain_days_per_mm: 0.05,
            base_rain_days: 3.0,
            days_in_month: 30.0,
            cv_threshold: 0.8,
            cv_penalty: 0.8,
            torrential_bonus: 15.0,
        }
    }
}

/// Probability of rain (0 to 100) and intensity class for an estimate.
///
/// `historical` holds the present same-month readings the estimate came
/// from; when there are at least two and they vary wildly the probability
/// is scaled down.
pub fn derive_probability(
    estimate: f64,
    historical: &[f64],
    config: &ProbabilityConfig,
) -> (f64, Intensity) {
    let rain_days = estimate * config.rain_days_per_mm + config.base_rain_days;
    let mut probability = (rain_days / config.days_in_month * 100.0).clamp(0.0, 100.0);

    if historical.len() > 1 {
        let cv = coefficient_of_variation(historical);
        if cv.is_finite() && cv > config.cv_threshold {
            probability *= config.cv_penalty;
        }
    }

    let intensity = Intensity::classify(estimate);
    if intensity == Intensity::Torrencial {
        probability = (probability + config.torrential_bonus).min(100.0);
    }

    (probability, intensity)
}
