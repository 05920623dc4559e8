//! Gap-filled monthly series assembly.

use crate::core::{MonthName, Observation};
use crate::names::normalize;
use crate::utils::stats::mean;
use std::collections::HashMap;

/// Mean of the present values for each calendar month, `0.0` where a month
/// has no value at all.
pub fn monthly_means<I>(readings: I) -> [f64; 12]
where
    I: IntoIterator<Item = (MonthName, Option<f64>)>,
{
    let mut buckets: [Vec<f64>; 12] = Default::default();
    for (month, value) in readings {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            buckets[month.index()].push(v);
        }
    }

    let mut means = [0.0; 12];
    for (slot, bucket) in means.iter_mut().zip(&buckets) {
        if !bucket.is_empty() {
            *slot = mean(bucket);
        }
    }
    means
}

/// Continuous monthly series for a station, January of the first year through
/// December of the last.
///
/// Observations are restricted to the station (normalized match), to years
/// before `upto_year` when given, and to recognizable months. Every
/// `(year, month)` without a present value is filled with that calendar
/// month's mean across the restricted set. The result has
/// `12 * (last_year - first_year + 1)` entries, or none if nothing matched.
pub fn assemble_series(
    observations: &[Observation],
    location: &str,
    upto_year: Option<i32>,
) -> Vec<f64> {
    let key = normalize(location);
    let readings: Vec<(i32, MonthName, Option<f64>)> = observations
        .iter()
        .filter(|o| upto_year.map_or(true, |limit| o.year < limit))
        .filter(|o| o.is_at(&key))
        .filter_map(|o| o.canonical_month().map(|m| (o.year, m, o.value)))
        .collect();

    let (Some(first_year), Some(last_year)) = (
        readings.iter().map(|r| r.0).min(),
        readings.iter().map(|r| r.0).max(),
    ) else {
        return Vec::new();
    };

    let fill = monthly_means(readings.iter().map(|&(_, m, v)| (m, v)));
    let lookup: HashMap<(i32, MonthName), Option<f64>> = readings
        .iter()
        .map(|&(year, month, value)| ((year, month), value))
        .collect();

    let years = (last_year - first_year + 1) as usize;
    let mut series = Vec::with_capacity(years * 12);
    for year in first_year..=last_year {
        for month in MonthName::ALL {
            let value = lookup
                .get(&(year, month))
                .copied()
                .flatten()
                .filter(|v| !v.is_nan())
                .unwrap_or(fill[month.index()]);
            series.push(value);
        }
    }
    series
}
