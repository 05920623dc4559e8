//! Outlier bounds for precipitation samples.

use crate::utils::stats::percentile;

/// Tukey fences `(Q1 - k * IQR, Q3 + k * IQR)` over the present values.
///
/// Missing and NaN entries are ignored. Returns `None` when nothing is left.
pub fn iqr_bounds(values: &[Option<f64>], k: f64) -> Option<(f64, f64)> {
    let present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|x| !x.is_nan())
        .collect();
    if present.is_empty() {
        return None;
    }

    let q1 = percentile(&present, 0.25);
    let q3 = percentile(&present, 0.75);
    let iqr = q3 - q1;

    Some((q1 - k * iqr, q3 + k * iqr))
}

/// Indices of values falling outside the Tukey fences.
pub fn iqr_outliers(values: &[Option<f64>], k: f64) -> Vec<usize> {
    let Some((lower, upper)) = iqr_bounds(values, k) else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| match v {
            Some(x) if *x < lower || *x > upper => Some(i),
            _ => None,
        })
        .collect()
}
