//! FFT helpers for spectral filtering.
//!
//! Thin wrappers over `rustfft` that work on full (two-sided) spectra so a
//! filtered spectrum can be transformed back without bookkeeping.

use rustfft::{num_complex::Complex64, FftPlanner};
use std::cmp::Ordering;

/// Forward DFT of a real-valued signal (full spectrum, length `n`).
pub fn fft(signal: &[f64]) -> Vec<Complex64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer
}

/// Inverse DFT, normalized by `1/n` so that `ifft(fft(x)) == x`.
pub fn ifft(spectrum: &[Complex64]) -> Vec<Complex64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer = spectrum.to_vec();

    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.iter_mut().for_each(|c| *c *= scale);
    buffer
}

/// Indices of the `count` components with the largest magnitude,
/// largest first. Equal magnitudes keep ascending index order.
pub fn dominant_components(spectrum: &[Complex64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..spectrum.len()).collect();
    order.sort_by(|&a, &b| {
        spectrum[b]
            .norm()
            .partial_cmp(&spectrum[a].norm())
            .unwrap_or(Ordering::Equal)
    });
    order.truncate(count);
    order
}

/// Zero every component except DC and the listed indices.
pub fn retain_components(spectrum: &[Complex64], keep: &[usize]) -> Vec<Complex64> {
    let mut filtered = vec![Complex64::new(0.0, 0.0); spectrum.len()];
    if let Some(dc) = spectrum.first() {
        filtered[0] = *dc;
    }
    for &idx in keep {
        if let Some(c) = spectrum.get(idx) {
            filtered[idx] = *c;
        }
    }
    filtered
}
