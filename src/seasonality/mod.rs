//! Frequency-domain seasonal reconstruction.
//!
//! This module provides:
//! - FFT helpers over full two-sided spectra
//! - [`SeasonalReconstructor`]: top-magnitude spectral filtering of a monthly
//!   series and a per-month seasonal estimate with a confidence weight

pub mod fft;
mod reconstruct;

pub use reconstruct::{Reconstruction, SeasonalConfig, SeasonalEstimate, SeasonalReconstructor};
