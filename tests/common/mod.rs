#![allow(dead_code)]

use std::f32::consts::PI;

/// Generates a sine wave.
pub fn sine_wave(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Generates deterministic pseudo-random noise in [-amp, amp].
pub fn noise(num_samples: usize, amp: f32, seed: u64) -> Vec<f32> {
    let mut state = seed;
    (0..num_samples)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let unit = ((state >> 33) as f32) / (u32::MAX >> 1) as f32;
            (unit * 2.0 - 1.0) * amp
        })
        .collect()
}

/// Splits a signal into fixed-size blocks, dropping any partial tail.
pub fn blocks(signal: &[f32], block_size: usize) -> Vec<&[f32]> {
    signal.chunks_exact(block_size).collect()
}
