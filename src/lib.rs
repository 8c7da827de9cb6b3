#![forbid(unsafe_code)]
//! Pure Rust implementation of the Paulstretch extreme time-stretching
//! algorithm.
//!
//! Paulstretch stretches audio to many times its original duration without
//! changing pitch content, by analyzing overlapping windows in the frequency
//! domain, discarding phase coherence, and resynthesizing each grain with
//! randomized phase. The result is not a faithful slow-down but a diffuse,
//! ambient texture — which is the point.
//!
//! # Quick start
//!
//! ```
//! use paulstretch::{stretch, StretchParams};
//!
//! // A short 440 Hz sine at 44.1 kHz
//! let input: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//!
//! let params = StretchParams::new(4.0)
//!     .with_window_size(256)
//!     .with_seed(42);
//!
//! let output = paulstretch::stretch(&input, &params).unwrap();
//! assert!(output.len() > input.len()); // ~4x longer
//! ```
//!
//! # Streaming
//!
//! For block-at-a-time processing, drive a [`Stretcher`] directly: write one
//! window-sized block, then read until `None`, then write the next block.
//! See [`Stretcher`] for the full call discipline.

pub mod core;
pub mod error;
pub mod io;
pub mod stream;
pub mod stretch;

pub use crate::core::types::{AudioBuffer, Sample, StretchParams, DEFAULT_WINDOW_SIZE};
pub use crate::error::StretchError;
pub use crate::stream::Stretcher;

use crate::core::rng::SEED_STRIDE;

/// Validates that input contains only finite samples.
///
/// Returns `Ok(false)` if input is empty (caller should return `Ok(vec![])`),
/// `Ok(true)` if input is valid, or `Err` if it contains NaN/Inf.
#[inline]
fn validate_input(input: &[f32]) -> Result<bool, StretchError> {
    if input.is_empty() {
        return Ok(false);
    }
    if input.iter().any(|s| !s.is_finite()) {
        return Err(StretchError::NonFiniteInput);
    }
    Ok(true)
}

/// Deinterleaves multi-channel audio into separate per-channel vectors.
#[inline]
fn deinterleave(input: &[f32], num_channels: usize) -> Vec<Vec<f32>> {
    (0..num_channels)
        .map(|ch| {
            input
                .iter()
                .skip(ch)
                .step_by(num_channels)
                .copied()
                .collect()
        })
        .collect()
}

/// Interleaves per-channel vectors into a single buffer, truncating to the
/// shortest channel.
#[inline]
fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let min_len = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..min_len)
        .flat_map(|i| channels.iter().map(move |ch| ch[i]))
        .collect()
}

/// Stretches one channel of audio samples by the given parameters.
///
/// This is the one-shot entry point: it chunks the input into window-sized
/// blocks (zero-padding the final partial block), drives the write/drain
/// loop of a [`Stretcher`], and concatenates the output. The first two
/// blocks prime the engine's analysis window and produce no output, so very
/// short inputs (under three windows) may come back shorter than
/// `input.len() * stretch_ratio`.
///
/// # Errors
///
/// Returns [`StretchError::InvalidRatio`] or
/// [`StretchError::InvalidWindowSize`] for out-of-range parameters, and
/// [`StretchError::NonFiniteInput`] if the input contains NaN or infinity.
///
/// # Example
///
/// ```
/// use paulstretch::StretchParams;
///
/// let input = vec![0.1f32; 4096];
/// let params = StretchParams::new(8.0).with_window_size(512).with_seed(1);
/// let output = paulstretch::stretch(&input, &params).unwrap();
/// assert_eq!(output.len() % 512, 0);
/// ```
pub fn stretch(input: &[f32], params: &StretchParams) -> Result<Vec<f32>, StretchError> {
    params.validate()?;
    if !validate_input(input)? {
        return Ok(vec![]);
    }

    let w = params.window_size;
    let mut engine = Stretcher::new(params)?;
    let mut output = Vec::with_capacity(
        (input.len() as f64 * params.stretch_ratio) as usize + w,
    );

    let mut block = vec![0.0f32; w];
    for chunk in input.chunks(w) {
        block[..chunk.len()].copy_from_slice(chunk);
        block[chunk.len()..].fill(0.0);

        engine.write(&block)?;
        while let Some(out) = engine.read() {
            output.extend_from_slice(out);
        }
    }

    Ok(output)
}

/// Stretches every channel of an interleaved audio buffer.
///
/// The core engine is single-channel; this runs one engine per channel and
/// reinterleaves. With an explicit seed, each channel's engine gets a
/// distinct seed offset so channel textures decorrelate; with no seed, the
/// process-wide counter already decorrelates them.
pub fn stretch_buffer(
    buffer: &AudioBuffer,
    params: &StretchParams,
) -> Result<AudioBuffer, StretchError> {
    params.validate()?;

    let num_channels = buffer.channels.max(1) as usize;
    let channels = deinterleave(&buffer.data, num_channels);

    let mut outputs = Vec::with_capacity(num_channels);
    for (ch, channel_data) in channels.iter().enumerate() {
        let mut channel_params = params.clone();
        if let Some(seed) = params.seed {
            channel_params.seed = Some(seed.wrapping_add(ch as u64 * SEED_STRIDE));
        }
        outputs.push(stretch(channel_data, &channel_params)?);
    }

    Ok(AudioBuffer::new(
        interleave(&outputs),
        buffer.channels,
        buffer.sample_rate,
    ))
}
