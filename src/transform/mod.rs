//! Data transformations applied before estimation.
//!
//! # Example
//!
//! ```
//! use precip_forecast::transform::{winsorize, WinsorLimits};
//!
//! let sample = vec![Some(12.0), None, Some(80.0), Some(95.0), Some(1400.0)];
//! let clipped = winsorize(&sample, &WinsorLimits::default());
//! assert_eq!(clipped.len(), sample.len());
//! ```

pub mod winsorize;

pub use winsorize::{
    clip_to_percentiles, robust_weighted_mean, winsorize, ClipResult, WinsorLimits,
};
