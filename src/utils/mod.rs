//! Utility functions shared by the estimators.

pub mod stats;

pub use stats::{coefficient_of_variation, mean, median, percentile, std_dev, variance};
