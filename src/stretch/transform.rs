//! Magnitude-only spectral transform with random-phase reconstruction.
//!
//! Each grain is windowed, transformed, and reduced to per-bin magnitudes;
//! resynthesis rebuilds a spectrum from those magnitudes with freshly drawn
//! phases, discarding all phase coherence between grains. This is what
//! smears the audio into texture.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::core::rng::PhaseRng;
use crate::core::window::analysis_window;

/// Forward/inverse spectral transform over one grain.
pub struct SpectralTransform {
    /// Transform length, 2x the engine's window size.
    size: usize,
    /// Precomputed analysis window.
    window: Vec<f32>,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    /// Reusable FFT buffer.
    spectrum: Vec<Complex<f32>>,
    /// Per-bin magnitudes for bins [0, size/2).
    magnitudes: Vec<f32>,
}

impl SpectralTransform {
    /// Creates a transform for grains of `size` samples. Plans are cached
    /// for the lifetime of the transform.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        Self {
            size,
            window: analysis_window(size),
            forward,
            inverse,
            spectrum: vec![Complex::new(0.0, 0.0); size],
            magnitudes: vec![0.0; size / 2],
        }
    }

    /// Returns the transform length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Multiplies the grain by the analysis window in place.
    pub fn apply_window(&self, grain: &mut [f32]) {
        debug_assert_eq!(grain.len(), self.size);
        for (sample, &w) in grain.iter_mut().zip(self.window.iter()) {
            *sample *= w;
        }
    }

    /// Runs the forward transform and stores per-bin magnitudes.
    ///
    /// Bin 0 is forced to zero (DC removal). Bins above `size/2` are
    /// redundant for a real signal and not stored.
    pub fn analyze(&mut self, grain: &[f32]) {
        debug_assert_eq!(grain.len(), self.size);
        for (slot, &sample) in self.spectrum.iter_mut().zip(grain.iter()) {
            *slot = Complex::new(sample, 0.0);
        }
        self.forward.process(&mut self.spectrum);

        self.magnitudes[0] = 0.0;
        for i in 1..self.size / 2 {
            self.magnitudes[i] = self.spectrum[i].norm();
        }
    }

    /// Rebuilds a time-domain grain from the stored magnitudes with phases
    /// drawn from `rng`.
    ///
    /// Bins 0 and `size/2` are zeroed; every other bin keeps its analyzed
    /// magnitude under a fresh random phase, mirrored conjugate-symmetric
    /// so the inverse transform yields a real signal. The inverse is
    /// unnormalized, so the output is divided by the transform length.
    pub fn synthesize(&mut self, rng: &mut PhaseRng, grain: &mut [f32]) {
        debug_assert_eq!(grain.len(), self.size);
        let half = self.size / 2;

        self.spectrum[0] = Complex::new(0.0, 0.0);
        self.spectrum[half] = Complex::new(0.0, 0.0);
        for i in 1..half {
            let magnitude = self.magnitudes[i];
            let (sin, cos) = rng.next_phase().sin_cos();
            let bin = Complex::new(magnitude * cos, magnitude * sin);
            self.spectrum[i] = bin;
            self.spectrum[self.size - i] = bin.conj();
        }
        self.inverse.process(&mut self.spectrum);

        let scale = 1.0 / self.size as f32;
        for (sample, bin) in grain.iter_mut().zip(self.spectrum.iter()) {
            *sample = bin.re * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine_grain(bin: usize, size: usize) -> Vec<f32> {
        (0..size)
            .map(|i| (2.0 * PI * bin as f32 * i as f32 / size as f32).sin())
            .collect()
    }

    #[test]
    fn test_analyze_finds_sine_bin() {
        let size = 256;
        let mut t = SpectralTransform::new(size);
        let grain = sine_grain(16, size);
        t.analyze(&grain);

        let peak_bin = (1..size / 2)
            .max_by(|&a, &b| t.magnitudes[a].total_cmp(&t.magnitudes[b]))
            .unwrap();
        assert_eq!(peak_bin, 16);
    }

    #[test]
    fn test_analyze_zeroes_dc() {
        let size = 128;
        let mut t = SpectralTransform::new(size);
        // Constant signal has all its energy at DC.
        let grain = vec![0.7f32; size];
        t.analyze(&grain);
        assert_eq!(t.magnitudes[0], 0.0);
    }

    #[test]
    fn test_synthesize_silence() {
        let size = 128;
        let mut t = SpectralTransform::new(size);
        let mut rng = PhaseRng::new(99);
        let zeros = vec![0.0f32; size];
        t.analyze(&zeros);
        let mut grain = vec![1.0f32; size];
        t.synthesize(&mut rng, &mut grain);
        for &s in &grain {
            assert_eq!(s, 0.0);
        }
    }

    #[test]
    fn test_synthesize_preserves_energy_scale() {
        let size = 256;
        let mut t = SpectralTransform::new(size);
        let mut rng = PhaseRng::new(7);
        let grain = sine_grain(16, size);
        t.analyze(&grain);

        let mut out = vec![0.0f32; size];
        t.synthesize(&mut rng, &mut out);

        let in_energy: f32 = grain.iter().map(|s| s * s).sum();
        let out_energy: f32 = out.iter().map(|s| s * s).sum();
        // Phase randomization preserves per-bin magnitudes, so total
        // energy should be close to the input's.
        assert!(
            (out_energy / in_energy - 1.0).abs() < 0.05,
            "energy ratio {}",
            out_energy / in_energy
        );
    }

    #[test]
    fn test_synthesize_output_is_real_valued() {
        // Conjugate symmetry means imaginary parts of the inverse are ~0;
        // the output must not blow up or go NaN.
        let size = 64;
        let mut t = SpectralTransform::new(size);
        let mut rng = PhaseRng::new(3);
        let grain: Vec<f32> = (0..size).map(|i| ((i * 37 % 17) as f32 - 8.0) / 8.0).collect();
        t.analyze(&grain);
        let mut out = vec![0.0f32; size];
        t.synthesize(&mut rng, &mut out);
        for &s in &out {
            assert!(s.is_finite());
        }
    }

    #[test]
    fn test_apply_window_attenuates_edges() {
        let size = 128;
        let t = SpectralTransform::new(size);
        let mut grain = vec![1.0f32; size];
        t.apply_window(&mut grain);
        assert!(grain[0] < 0.1);
        assert!(grain[size - 1] < 0.1);
        assert!(grain[size / 2] > 0.9);
    }
}
