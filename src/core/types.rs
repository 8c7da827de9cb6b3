//! Core audio types and stretch parameters.

use crate::error::StretchError;

/// A single audio sample (32-bit float, range -1.0 to 1.0).
pub type Sample = f32;

/// Parameters controlling a stretch operation.
///
/// Built with a fluent API:
///
/// ```
/// use paulstretch::StretchParams;
///
/// let params = StretchParams::new(8.0)
///     .with_window_size(4096)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StretchParams {
    /// Output duration divided by input duration. Must be >= 1.0.
    pub stretch_ratio: f64,
    /// Samples per I/O block; also half the FFT size.
    ///
    /// Around 0.25 seconds of audio works best for most material; larger
    /// values smear the sound further into texture. Must be >= 2; values
    /// below 128 are permitted but not recommended.
    pub window_size: usize,
    /// Explicit phase-randomization seed. When `None`, a process-wide
    /// counter supplies a fresh seed per engine.
    pub seed: Option<u64>,
}

/// Default window size: 0.25 s at 44.1 kHz, rounded to a power of two.
pub const DEFAULT_WINDOW_SIZE: usize = 8192;

impl StretchParams {
    /// Creates parameters with the given stretch ratio and defaults elsewhere.
    pub fn new(stretch_ratio: f64) -> Self {
        Self {
            stretch_ratio,
            window_size: DEFAULT_WINDOW_SIZE,
            seed: None,
        }
    }

    /// Sets the window size in samples.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Sets an explicit seed for deterministic phase randomization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates ratio and window size.
    pub fn validate(&self) -> Result<(), StretchError> {
        if !self.stretch_ratio.is_finite() || self.stretch_ratio < 1.0 {
            return Err(StretchError::InvalidRatio(self.stretch_ratio));
        }
        if self.window_size < 2 {
            return Err(StretchError::InvalidWindowSize(self.window_size));
        }
        Ok(())
    }
}

/// Buffer holding audio samples in interleaved format.
///
/// For mono audio, samples are stored sequentially: `[s0, s1, s2, ...]`
/// For stereo audio, samples are interleaved: `[L0, R0, L1, R1, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Raw interleaved sample data.
    pub data: Vec<Sample>,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Creates a new audio buffer from interleaved data.
    pub fn new(data: Vec<Sample>, channels: u16, sample_rate: u32) -> Self {
        Self {
            data,
            channels,
            sample_rate,
        }
    }

    /// Creates a mono buffer.
    pub fn from_mono(data: Vec<Sample>, sample_rate: u32) -> Self {
        Self::new(data, 1, sample_rate)
    }

    /// Number of frames in the buffer (total samples / channels).
    pub fn num_frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.data.len() / self.channels as usize
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Returns true if the buffer contains no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_builder() {
        let params = StretchParams::new(8.0).with_window_size(1024).with_seed(7);
        assert_eq!(params.stretch_ratio, 8.0);
        assert_eq!(params.window_size, 1024);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn test_params_defaults() {
        let params = StretchParams::new(2.0);
        assert_eq!(params.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(params.seed, None);
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        assert!(StretchParams::new(0.5).validate().is_err());
        assert!(StretchParams::new(f64::NAN).validate().is_err());
        assert!(StretchParams::new(f64::INFINITY).validate().is_err());
        assert!(StretchParams::new(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_window() {
        assert!(StretchParams::new(2.0).with_window_size(0).validate().is_err());
        assert!(StretchParams::new(2.0).with_window_size(1).validate().is_err());
        assert!(StretchParams::new(2.0).with_window_size(4).validate().is_ok());
    }

    #[test]
    fn test_audio_buffer_frames() {
        let buf = AudioBuffer::new(vec![0.0; 10], 2, 44100);
        assert_eq!(buf.num_frames(), 5);
        assert!((buf.duration_secs() - 5.0 / 44100.0).abs() < 1e-12);
    }
}
