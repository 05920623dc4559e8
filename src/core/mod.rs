//! Core data structures: months, observations and prediction results.

mod forecast;
mod month;
mod observation;

pub use forecast::{
    Contrast, ContrastReport, Intensity, ObservationWindow, PrecipitationForecast,
    PredictionDiagnostics, PredictionReport, PredictionResponse, NOT_AVAILABLE,
    NOT_AVAILABLE_EMOJI,
};
pub use month::{MonthInput, MonthName};
pub use observation::{ImportSummary, Observation, ObservationStore, RecordKey, Upsert};
