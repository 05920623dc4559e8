//! # precip-forecast
//!
//! Monthly precipitation prediction for named weather stations.
//!
//! An estimate blends a recency-weighted, winsorized average of the same
//! calendar month in past years with an FFT seasonal reconstruction of the
//! station's gap-filled monthly series. Each estimate carries a rain
//! probability and an intensity class, and can be contrasted against the
//! value later recorded. CSV ingestion, a station registry and TOML
//! configuration surround the engine.
//!
//! ```
//! use precip_forecast::prelude::*;
//!
//! let data = vec![
//!     Observation::new("Enero", 2019, Some(130.0), "Pilar"),
//!     Observation::new("Enero", 2020, Some(150.0), "Pilar"),
//! ];
//! let forecast = predict(&data, "enero", 2021, "Pilar");
//! assert!(forecast.is_available());
//! ```

pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod ingest;
pub mod models;
pub mod names;
pub mod seasonality;
pub mod series;
pub mod stations;
pub mod transform;
pub mod utils;

pub use error::{PrecipError, Result};

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::{
        Contrast, Intensity, MonthName, Observation, ObservationStore, PrecipitationForecast,
        PredictionResponse,
    };
    pub use crate::error::{PrecipError, Result};
    pub use crate::models::{contrast, predict, Estimator, Predictor, PredictorConfig};
    pub use crate::names::{canonicalize_month, normalize};
    pub use crate::series::{assemble_series, recent_history};
}
