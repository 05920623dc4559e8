//! Seasonal reconstruction by spectral filtering.
//!
//! A gap-free monthly series is clipped, transformed, stripped of every
//! frequency component except DC and the strongest few, and transformed back.
//! What survives is the dominant periodic structure; averaging the
//! reconstruction over one calendar month gives a denoised seasonal estimate.

use super::fft::{dominant_components, fft, ifft, retain_components};
use crate::core::MonthName;
use crate::transform::{clip_to_percentiles, WinsorLimits};
use crate::utils::stats::{coefficient_of_variation, mean};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration for seasonal reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalConfig {
    /// Minimum series length for reconstruction to run.
    pub min_len: usize,
    /// Seasonal period of the series.
    pub period: usize,
    /// Percentile range the series is clipped to before the transform.
    pub clip: WinsorLimits,
    /// Fraction of the spectrum length kept as dominant components.
    pub component_fraction: f64,
    /// Lower bound on retained components.
    pub min_components: usize,
    /// Blend weight when at least `min_full_matches` positions were averaged.
    pub full_weight: f64,
    /// Blend weight when fewer positions were averaged.
    pub partial_weight: f64,
    pub min_full_matches: usize,
    /// Coefficient of variation above which the weight is damped.
    pub cv_threshold: f64,
    pub cv_damping: f64,
}

impl Default for SeasonalConfig {
    fn default() -> Self {
        Self {
            min_len: 24,
            period: 12,
            clip: WinsorLimits::new(0.01, 0.99),
            component_fraction: 0.1,
            min_components: 3,
            full_weight: 0.6,
            partial_weight: 0.3,
            min_full_matches: 3,
            cv_threshold: 1.0,
            cv_damping: 0.5,
        }
    }
}

impl SeasonalConfig {
    /// Set minimum series length.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Set the retained spectrum fraction and its floor.
    pub fn with_components(mut self, fraction: f64, min_components: usize) -> Self {
        self.component_fraction = fraction.clamp(0.0, 1.0);
        self.min_components = min_components;
        self
    }

    /// Set the pre-transform clipping range.
    pub fn with_clip(mut self, clip: WinsorLimits) -> Self {
        self.clip = clip;
        self
    }
}

/// Denoised series produced by [`SeasonalReconstructor::reconstruct`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    pub values: Vec<f64>,
    /// Number of dominant components selected.
    pub components: usize,
    /// Coefficient of variation of the clipped input.
    pub coefficient_of_variation: f64,
    /// Whether clipping altered any input value.
    pub clipped: bool,
}

/// Seasonal estimate for one calendar month and its blend weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalEstimate {
    pub estimate: f64,
    pub weight: f64,
    /// Number of series positions that fell on the target month.
    pub matches: usize,
    pub components: usize,
    pub coefficient_of_variation: f64,
    pub clipped: bool,
}

/// FFT-based seasonal reconstructor.
#[derive(Debug, Clone, Default)]
pub struct SeasonalReconstructor {
    config: SeasonalConfig,
}

impl SeasonalReconstructor {
    pub fn new(config: SeasonalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeasonalConfig {
        &self.config
    }

    /// Whether a series of this length is long enough to reconstruct.
    pub fn accepts(&self, len: usize) -> bool {
        len >= self.config.min_len
    }

    /// Number of dominant components kept for a series of length `len`.
    pub fn component_count(&self, len: usize) -> usize {
        let scaled = (self.config.component_fraction * len as f64).round() as usize;
        scaled.max(self.config.min_components).min(len)
    }

    /// Clip, filter and inverse-transform the series.
    ///
    /// Returns `None` if the series is shorter than the configured minimum.
    pub fn reconstruct(&self, series: &[f64]) -> Option<Reconstruction> {
        if !self.accepts(series.len()) {
            return None;
        }

        let clip = clip_to_percentiles(series, &self.config.clip);
        if clip.clipped {
            info!(
                lower = clip.lower_bound,
                upper = clip.upper_bound,
                "series clipped before transform"
            );
        }

        let spectrum = fft(&clip.data);
        let components = self.component_count(spectrum.len());
        let keep = dominant_components(&spectrum, components);
        let values = ifft(&retain_components(&spectrum, &keep))
            .into_iter()
            .map(|c| c.re)
            .collect();

        Some(Reconstruction {
            values,
            components,
            coefficient_of_variation: coefficient_of_variation(&clip.data),
            clipped: clip.clipped,
        })
    }

    /// Seasonal estimate for `month` with its confidence weight.
    ///
    /// Position `i` of the series is taken to fall on calendar month
    /// `i mod period`, i.e. the series starts in January.
    pub fn estimate(&self, series: &[f64], month: MonthName) -> Option<SeasonalEstimate> {
        let reconstruction = self.reconstruct(series)?;
        let period = self.config.period.max(1);

        let same_month: Vec<f64> = reconstruction
            .values
            .iter()
            .enumerate()
            .filter(|(i, _)| i % period == month.index())
            .map(|(_, v)| *v)
            .collect();

        let estimate = if same_month.is_empty() {
            mean(&reconstruction.values)
        } else {
            mean(&same_month)
        };

        let matches = same_month.len();
        let mut weight = if matches >= self.config.min_full_matches {
            self.config.full_weight
        } else if matches >= 1 {
            self.config.partial_weight
        } else {
            0.0
        };
        if reconstruction.coefficient_of_variation > self.config.cv_threshold {
            weight *= self.config.cv_damping;
        }

        Some(SeasonalEstimate {
            estimate,
            weight,
            matches,
            components: reconstruction.components,
            coefficient_of_variation: reconstruction.coefficient_of_variation,
            clipped: reconstruction.clipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seasonal_series(years: usize, base: f64, amplitude: f64) -> Vec<f64> {
        (0..years * 12)
            .map(|i| base + amplitude * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
            .collect()
    }

    #[test]
    fn short_series_is_rejected() {
        let reconstructor = SeasonalReconstructor::default();
        assert!(reconstructor.reconstruct(&[10.0; 12]).is_none());
        assert!(reconstructor.estimate(&[10.0; 23], MonthName::Enero).is_none());
        assert!(reconstructor.reconstruct(&[10.0; 24]).is_some());
        assert!(!reconstructor.accepts(23));
        assert!(reconstructor.accepts(24));
    }

    #[test]
    fn component_count_rounds_with_floor() {
        let reconstructor = SeasonalReconstructor::default();
        assert_eq!(reconstructor.component_count(24), 3);
        assert_eq!(reconstructor.component_count(36), 4);
        assert_eq!(reconstructor.component_count(120), 12);
    }

    #[test]
    fn reconstruction_preserves_length_and_mean() {
        let series = seasonal_series(5, 100.0, 40.0);
        let reconstruction = SeasonalReconstructor::default()
            .reconstruct(&series)
            .unwrap();
        assert_eq!(reconstruction.values.len(), series.len());
        // DC is always retained, so the mean of the clipped input survives
        let clipped_mean = mean(
            &clip_to_percentiles(&series, &WinsorLimits::new(0.01, 0.99)).data,
        );
        assert_relative_eq!(mean(&reconstruction.values), clipped_mean, epsilon = 1e-9);
    }

    #[test]
    fn constant_series_reconstructs_exactly() {
        let reconstruction = SeasonalReconstructor::default()
            .reconstruct(&[42.0; 48])
            .unwrap();
        for v in reconstruction.values {
            assert_relative_eq!(v, 42.0, epsilon = 1e-9);
        }
        assert!(!reconstruction.clipped);
    }

    #[test]
    fn estimate_recovers_peak_month() {
        // Peak of sin at i % 12 == 3 (Abril)
        let series = seasonal_series(10, 100.0, 80.0);
        let estimate = SeasonalReconstructor::default()
            .estimate(&series, MonthName::Abril)
            .unwrap();
        assert!((estimate.estimate - 180.0).abs() < 5.0, "{:?}", estimate);
        assert_eq!(estimate.matches, 10);
        assert_relative_eq!(estimate.weight, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn erratic_series_halves_weight() {
        // Mostly dry months with rare heavy ones: CV well above 1
        let series: Vec<f64> = (0..36)
            .map(|i| if i % 12 == 0 { 300.0 } else { 1.0 })
            .collect();
        let estimate = SeasonalReconstructor::default()
            .estimate(&series, MonthName::Enero)
            .unwrap();
        assert!(estimate.coefficient_of_variation > 1.0);
        assert_relative_eq!(estimate.weight, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn zero_series_has_infinite_cv() {
        let estimate = SeasonalReconstructor::default()
            .estimate(&[0.0; 24], MonthName::Mayo)
            .unwrap();
        // Two matching positions (partial weight), then damped
        assert_eq!(estimate.matches, 2);
        assert!(estimate.coefficient_of_variation.is_infinite());
        assert_relative_eq!(estimate.weight, 0.15, epsilon = 1e-12);
        assert_relative_eq!(estimate.estimate, 0.0, epsilon = 1e-12);
    }
}
