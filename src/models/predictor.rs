//! Blended monthly precipitation predictor.
//!
//! The estimate for `(month, year, station)` combines two views of the
//! station's past:
//!
//! - a recency-weighted, winsorized mean of the same calendar month in the
//!   preceding years (widened to all prior years when the recent window is
//!   empty);
//! - an FFT seasonal reconstruction of the whole gap-filled series, used only
//!   when at least two full years are available.
//!
//! The reconstruction's confidence weight decides the blend. Missing data and
//! numeric degeneracies never produce errors: the former yields the
//! no-prediction sentinel, the latter falls back to the historical mean.

use super::probability::{derive_probability, ProbabilityConfig};
use super::traits::Estimator;
use crate::core::{
    MonthInput, Observation, ObservationWindow, PrecipitationForecast, PredictionDiagnostics,
};
use crate::detection::iqr_outliers;
use crate::error::{PrecipError, Result};
use crate::names::{canonicalize_month, normalize};
use crate::seasonality::{SeasonalConfig, SeasonalReconstructor};
use crate::series::assemble_series;
use crate::transform::{robust_weighted_mean, WinsorLimits};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for [`Predictor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Years before the target year searched first for same-month readings.
    pub recent_years: i32,
    /// Readings within this many years of the newest one get `recent_weight`.
    pub recency_horizon: i32,
    pub recent_weight: f64,
    pub base_weight: f64,
    pub winsor: WinsorLimits,
    /// Tukey multiplier used to flag extreme historical months.
    pub outlier_k: f64,
    pub seasonal: SeasonalConfig,
    pub probability: ProbabilityConfig,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            recent_years: 5,
            recency_horizon: 5,
            recent_weight: 2.0,
            base_weight: 1.0,
            winsor: WinsorLimits::default(),
            outlier_k: 1.5,
            seasonal: SeasonalConfig::default(),
            probability: ProbabilityConfig::default(),
        }
    }
}

impl PredictorConfig {
    /// Set the recent observation window.
    pub fn with_recent_years(mut self, years: i32) -> Self {
        self.recent_years = years;
        self
    }

    /// Set the winsorization limits for the historical mean.
    pub fn with_winsor(mut self, winsor: WinsorLimits) -> Self {
        self.winsor = winsor;
        self
    }

    /// Set the seasonal reconstruction configuration.
    pub fn with_seasonal(mut self, seasonal: SeasonalConfig) -> Self {
        self.seasonal = seasonal;
        self
    }

    /// Check limits and weights for consistency.
    pub fn validate(&self) -> Result<()> {
        self.winsor.validate()?;
        self.seasonal.clip.validate()?;
        if self.seasonal.min_len == 0 {
            return Err(PrecipError::InvalidParameter(
                "seasonal min_len must be at least 1".to_string(),
            ));
        }
        if self.recent_years < 0 || self.recency_horizon < 0 {
            return Err(PrecipError::InvalidParameter(
                "year windows must not be negative".to_string(),
            ));
        }
        let weights = [
            self.recent_weight,
            self.base_weight,
            self.seasonal.full_weight,
            self.seasonal.partial_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PrecipError::InvalidParameter(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        if self.seasonal.full_weight > 1.0 || self.seasonal.partial_weight > 1.0 {
            return Err(PrecipError::InvalidParameter(
                "seasonal blend weights must not exceed 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Monthly precipitation predictor.
///
/// # Example
/// ```
/// use precip_forecast::core::Observation;
/// use precip_forecast::models::Predictor;
///
/// let data = vec![
///     Observation::new("Enero", 2022, Some(160.0), "Pilar"),
///     Observation::new("Febrero", 2022, Some(90.0), "Pilar"),
/// ];
/// let forecast = Predictor::default().predict(&data, "Enero", 2023, "Pilar");
/// assert!(forecast.is_available());
/// assert_eq!(forecast.intensity_label(), "Muy Abundante");
/// ```
#[derive(Debug, Clone)]
pub struct Predictor {
    config: PredictorConfig,
    reconstructor: Option<SeasonalReconstructor>,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(PredictorConfig::default())
    }
}

impl Predictor {
    pub fn new(config: PredictorConfig) -> Self {
        let reconstructor = Some(SeasonalReconstructor::new(config.seasonal.clone()));
        Self {
            config,
            reconstructor,
        }
    }

    /// Predictor that never blends in the seasonal reconstruction.
    ///
    /// `config.seasonal` is kept for reference but unused.
    pub fn historical_only(config: PredictorConfig) -> Self {
        Self {
            config,
            reconstructor: None,
        }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Predict precipitation for `month` of `year` at `location`.
    ///
    /// Only observations strictly before `year` are used.
    pub fn predict(
        &self,
        observations: &[Observation],
        month: impl Into<MonthInput>,
        year: i32,
        location: &str,
    ) -> PrecipitationForecast {
        let month = month.into();
        let Some(target) = canonicalize_month(month.clone()) else {
            warn!(%month, "unrecognized month, no prediction");
            return PrecipitationForecast::no_data();
        };

        let series = assemble_series(observations, location, Some(year));

        let key = normalize(location);
        let prior: Vec<&Observation> = observations
            .iter()
            .filter(|o| o.year < year)
            .filter(|o| o.canonical_month() == Some(target))
            .filter(|o| o.is_at(&key))
            .collect();

        let recent: Vec<&Observation> = prior
            .iter()
            .copied()
            .filter(|o| o.year >= year - self.config.recent_years)
            .collect();

        let (gathered, window) = if recent.is_empty() {
            (prior, ObservationWindow::Widened)
        } else {
            (recent, ObservationWindow::Recent)
        };

        let Some(newest) = gathered.iter().map(|o| o.year).max() else {
            return PrecipitationForecast::no_data();
        };
        if window == ObservationWindow::Widened {
            debug!(%location, month = %target, "no recent readings, using all prior years");
        }

        let mut values = Vec::with_capacity(gathered.len());
        let mut weights = Vec::with_capacity(gathered.len());
        for o in &gathered {
            if let Some(v) = o.value.filter(|v| *v >= 0.0) {
                values.push(v);
                weights.push(if newest - o.year <= self.config.recency_horizon {
                    self.config.recent_weight
                } else {
                    self.config.base_weight
                });
            }
        }

        let historical = if values.is_empty() {
            0.0
        } else {
            robust_weighted_mean(&values, Some(&weights), &self.config.winsor)
        };

        let seasonal = self
            .reconstructor
            .as_ref()
            .and_then(|r| r.estimate(&series, target));
        let (estimate, fell_back) = match &seasonal {
            Some(s) => {
                let blended = s.estimate * s.weight + historical * (1.0 - s.weight);
                if blended.is_nan() || blended < 0.0 {
                    debug!(%location, month = %target, blended, "blend rejected, using historical mean");
                    (historical, true)
                } else {
                    (blended, false)
                }
            }
            None => (historical, false),
        };

        let (probability, intensity) =
            derive_probability(estimate, &values, &self.config.probability);

        let readings: Vec<Option<f64>> = gathered.iter().map(|o| o.value).collect();
        let outlier_years = iqr_outliers(&readings, self.config.outlier_k)
            .into_iter()
            .map(|i| gathered[i].year)
            .collect();

        PrecipitationForecast {
            estimate: Some(estimate),
            probability,
            intensity: Some(intensity),
            diagnostics: Some(PredictionDiagnostics {
                window,
                observations: gathered.len(),
                historical_estimate: historical,
                seasonal,
                series_len: series.len(),
                fell_back,
                outlier_years,
            }),
        }
    }
}

impl Estimator for Predictor {
    fn estimate(
        &self,
        observations: &[Observation],
        month: MonthInput,
        year: i32,
        location: &str,
    ) -> PrecipitationForecast {
        self.predict(observations, month, year, location)
    }

    fn name(&self) -> &str {
        if self.reconstructor.is_some() {
            "RobustFFTBlend"
        } else {
            "HistoricalMean"
        }
    }
}

/// Predict with the default configuration.
pub fn predict(
    observations: &[Observation],
    month: impl Into<MonthInput>,
    year: i32,
    location: &str,
) -> PrecipitationForecast {
    Predictor::default().predict(observations, month, year, location)
}
