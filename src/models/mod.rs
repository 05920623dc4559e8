//! Prediction models.
//!
//! [`Predictor`] is the blended robust-mean / seasonal estimator;
//! [`contrast`] checks its output against recorded values.

mod contrast;
mod predictor;
mod probability;
mod traits;

pub use contrast::contrast;
pub use predictor::{predict, Predictor, PredictorConfig};
pub use probability::{derive_probability, ProbabilityConfig};
pub use traits::{BoxedEstimator, Estimator};
