//! Estimator trait defining the common interface for monthly predictors.

use crate::core::{MonthInput, Observation, PrecipitationForecast};

/// Common interface for monthly precipitation estimators.
///
/// This trait is object-safe and can be used with `Box<dyn Estimator>`.
/// Estimators never fail: when nothing can be said they return
/// [`PrecipitationForecast::no_data`].
pub trait Estimator {
    /// Estimate precipitation for `month` of `year` at `location` from the
    /// observations recorded before `year`.
    fn estimate(
        &self,
        observations: &[Observation],
        month: MonthInput,
        year: i32,
        location: &str,
    ) -> PrecipitationForecast;

    /// Get the model name.
    fn name(&self) -> &str;
}

/// Type alias for boxed estimator trait objects.
///
/// # Example
///
/// ```
/// use precip_forecast::models::{BoxedEstimator, Estimator, Predictor, PredictorConfig};
///
/// let model: BoxedEstimator = Box::new(Predictor::historical_only(PredictorConfig::default()));
/// assert_eq!(model.name(), "HistoricalMean");
/// ```
pub type BoxedEstimator = Box<dyn Estimator + Send + Sync>;
