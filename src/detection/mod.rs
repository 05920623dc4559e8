//! Detection utilities for precipitation samples.
//!
//! This module provides IQR-based outlier fences, reported alongside
//! predictions so callers can see which historical months were extreme.

mod outlier;

pub use outlier::{iqr_bounds, iqr_outliers};
