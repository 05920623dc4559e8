//! Comparison of a prediction with the value actually recorded.

use crate::core::{Contrast, Observation};
use crate::names::normalize;

/// Look up the recorded value for `(month, year, location)` and its absolute
/// error against `predicted`.
///
/// The month is matched case-insensitively against the stored spelling, not
/// canonicalized; the station is matched by normalized name. The first match
/// decides: if its value is missing, or no record matches, or there is no
/// prediction, the corresponding fields are `None`.
pub fn contrast(
    observations: &[Observation],
    month: &str,
    year: i32,
    location: &str,
    predicted: Option<f64>,
) -> Contrast {
    let month = month.to_lowercase();
    let key = normalize(location);

    let observed = observations
        .iter()
        .find(|o| o.year == year && o.month.to_lowercase() == month && o.is_at(&key))
        .and_then(|o| o.value);

    match observed {
        Some(real) => Contrast {
            observed: Some(real),
            absolute_error: predicted.map(|p| (real - p).abs()),
        },
        None => Contrast::default(),
    }
}
