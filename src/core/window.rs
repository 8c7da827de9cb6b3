//! Window and blending curves used by the stretch engine.
//!
//! All curves are precomputed once at engine construction and reused on
//! every processing step.

use std::f64::consts::PI;

/// Hamming-family analysis window coefficients.
const HAMMING_A0: f64 = 0.53836;
const HAMMING_A1: f64 = 0.46164;

/// `(1 + 1/sqrt(2)) / 2`, the peak of the output shaping curve.
const HINV_SQRT2: f64 = 0.5 * (1.0 + std::f64::consts::FRAC_1_SQRT_2);

/// Generates the analysis window applied to each grain before the forward
/// transform.
///
/// `w[i] = 0.53836 - 0.46164 * cos(2*pi*i / (size + 1))` — a Hamming variant
/// with the denominator offset by one, so the window never quite reaches
/// zero at either edge.
pub fn analysis_window(size: usize) -> Vec<f32> {
    let denom = size as f64 + 1.0;
    (0..size)
        .map(|i| (HAMMING_A0 - HAMMING_A1 * (2.0 * PI * i as f64 / denom).cos()) as f32)
        .collect()
}

/// Generates the raised-cosine cross-fade curve for blending successive
/// grains.
///
/// `c[i] = 0.5 + 0.5 * cos(i*pi / size)` runs from 1.0 down to near 0.0
/// across the block; it weights the previous grain, so each output sample
/// fades from the old grain into the new one.
pub fn crossfade_curve(size: usize) -> Vec<f32> {
    let freq = PI / size as f64;
    (0..size)
        .map(|i| (0.5 + 0.5 * (i as f64 * freq).cos()) as f32)
        .collect()
}

/// Generates the output shaping curve compensating the analysis window's
/// attenuation.
///
/// `s[i] = hinv_sqrt2 - (1 - hinv_sqrt2) * cos(2*i*pi / size)` with
/// `hinv_sqrt2 = (1 + 1/sqrt(2)) / 2`.
pub fn shaping_curve(size: usize) -> Vec<f32> {
    let freq = 2.0 * PI / size as f64;
    (0..size)
        .map(|i| (HINV_SQRT2 - (1.0 - HINV_SQRT2) * (i as f64 * freq).cos()) as f32)
        .collect()
}
