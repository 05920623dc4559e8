//! Prediction and contrast results, plus their presentation shapes.

use crate::seasonality::SeasonalEstimate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label reported when no prediction could be made.
pub const NOT_AVAILABLE: &str = "N/A";

/// Emoji reported when no prediction could be made.
pub const NOT_AVAILABLE_EMOJI: &str = "❓";

/// Qualitative precipitation class for a monthly total (mm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Escasa,
    Moderada,
    Abundante,
    MuyAbundante,
    Torrencial,
}

impl Intensity {
    /// Classify a monthly estimate using the fixed thresholds
    /// `<20`, `<70`, `<150`, `<300`, otherwise torrential.
    pub fn classify(estimate: f64) -> Self {
        if estimate < 20.0 {
            Intensity::Escasa
        } else if estimate < 70.0 {
            Intensity::Moderada
        } else if estimate < 150.0 {
            Intensity::Abundante
        } else if estimate < 300.0 {
            Intensity::MuyAbundante
        } else {
            Intensity::Torrencial
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Intensity::Escasa => "Escasa",
            Intensity::Moderada => "Moderada",
            Intensity::Abundante => "Abundante",
            Intensity::MuyAbundante => "Muy Abundante",
            Intensity::Torrencial => "Torrencial",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Intensity::Escasa => "☀️",
            Intensity::Moderada => "☁️",
            Intensity::Abundante => "🌦️",
            Intensity::MuyAbundante => "🌧️",
            Intensity::Torrencial => "⛈️",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which set of same-month observations fed the historical estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObservationWindow {
    /// The years immediately preceding the target year.
    Recent,
    /// The recent window was empty; every prior year was used.
    Widened,
}

/// Internal details of how an estimate was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDiagnostics {
    pub window: ObservationWindow,
    /// Number of same-month observations gathered (nulls included).
    pub observations: usize,
    pub historical_estimate: f64,
    /// Present only when the series was long enough for reconstruction.
    pub seasonal: Option<SeasonalEstimate>,
    pub series_len: usize,
    /// The blended value was NaN or negative and was replaced.
    pub fell_back: bool,
    /// Years whose reading lies outside the Tukey fences of the gathered sample.
    pub outlier_years: Vec<i32>,
}

/// Estimated monthly precipitation with derived probability and class.
///
/// Values are kept at full precision; rounding happens in [`Self::report`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationForecast {
    pub estimate: Option<f64>,
    pub probability: f64,
    pub intensity: Option<Intensity>,
    pub diagnostics: Option<PredictionDiagnostics>,
}

impl PrecipitationForecast {
    /// The "no prediction available" sentinel.
    pub fn no_data() -> Self {
        Self {
            estimate: None,
            probability: 0.0,
            intensity: None,
            diagnostics: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.estimate.is_some()
    }

    pub fn intensity_label(&self) -> &'static str {
        self.intensity.map(Intensity::label).unwrap_or(NOT_AVAILABLE)
    }

    pub fn emoji(&self) -> &'static str {
        self.intensity
            .map(Intensity::emoji)
            .unwrap_or(NOT_AVAILABLE_EMOJI)
    }

    /// Presentation form, rounded to two decimals.
    pub fn report(&self) -> PredictionReport {
        PredictionReport {
            estimate: self.estimate.map(round2),
            probability: round2(self.probability),
            intensity: self.intensity_label().to_string(),
            emoji: self.emoji().to_string(),
        }
    }
}

/// Comparison of a prediction against the recorded value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contrast {
    pub observed: Option<f64>,
    pub absolute_error: Option<f64>,
}

impl Contrast {
    pub fn report(&self) -> ContrastReport {
        ContrastReport {
            observed: self.observed.map(round2),
            error: self.absolute_error.map(round2),
        }
    }
}

/// Serialized prediction, `{estimacion, probabilidad, intensidad, emoji}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    #[serde(rename = "estimacion")]
    pub estimate: Option<f64>,
    #[serde(rename = "probabilidad")]
    pub probability: f64,
    #[serde(rename = "intensidad")]
    pub intensity: String,
    pub emoji: String,
}

/// Serialized contrast, `{real, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    #[serde(rename = "real")]
    pub observed: Option<f64>,
    pub error: Option<f64>,
}

/// Prediction and contrast in a single flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(flatten)]
    pub prediction: PredictionReport,
    #[serde(flatten)]
    pub contrast: ContrastReport,
}

impl PredictionResponse {
    pub fn new(forecast: &PrecipitationForecast, contrast: &Contrast) -> Self {
        Self {
            prediction: forecast.report(),
            contrast: contrast.report(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
