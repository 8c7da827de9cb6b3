//! Streaming stretch engine: sliding-window buffering, overlap-add
//! resynthesis, and the write/read call discipline.

use crate::core::rng::{self, PhaseRng};
use crate::core::types::StretchParams;
use crate::core::window::{crossfade_curve, shaping_curve};
use crate::error::StretchError;
use crate::stretch::transform::SpectralTransform;

/// Output gain applied after cross-fading, before clipping.
const AMPLIFICATION: f32 = 2.0;

/// Number of input blocks buffered before the first output is produced.
const STARTUP_BLOCKS: usize = 3;

/// Streaming Paulstretch engine for a single audio channel.
///
/// The engine consumes fixed-size input blocks via [`write`](Self::write)
/// and yields a variable number of stretched output blocks per input via
/// [`read`](Self::read). The caller drives it in strict alternation:
/// write one block, then read until no more output is available, then
/// write the next block.
///
/// All buffers and transform plans are owned by the engine and released
/// when it is dropped.
///
/// ```
/// use paulstretch::{Stretcher, StretchParams};
///
/// let params = StretchParams::new(4.0).with_window_size(256).with_seed(1);
/// let mut stretcher = Stretcher::new(&params).unwrap();
///
/// let block = vec![0.0f32; 256];
/// let mut output = Vec::new();
/// for _ in 0..8 {
///     stretcher.write(&block).unwrap();
///     while let Some(out) = stretcher.read() {
///         output.extend_from_slice(out);
///     }
/// }
/// assert!(!output.is_empty());
/// ```
pub struct Stretcher {
    stretch_ratio: f64,
    window_size: usize,
    /// The three most recent input blocks, concatenated.
    input_history: Vec<f32>,
    /// Most recently synthesized output block.
    output_block: Vec<f32>,
    /// Pre-crossfade first half of the previous grain.
    previous_grain: Vec<f32>,
    /// Scratch grain for the spectral transform, 2x window size.
    workspace: Vec<f32>,
    transform: SpectralTransform,
    rng: PhaseRng,
    /// Precomputed raised-cosine blend weights for the previous grain.
    crossfade: Vec<f32>,
    /// Precomputed output shaping curve.
    shaping: Vec<f32>,
    /// Counts down over the first writes while the history fills.
    startup_remaining: usize,
    /// Fractional position of the analysis grain within the window, [0, 1).
    position: f64,
    output_ready: bool,
    needs_input: bool,
}

impl Stretcher {
    /// Creates an engine from validated parameters.
    ///
    /// All buffers and transform plans are allocated here; processing never
    /// allocates. When `params.seed` is unset, a process-wide counter
    /// supplies a fresh seed so that engines created together decorrelate.
    pub fn new(params: &StretchParams) -> Result<Self, StretchError> {
        params.validate()?;
        let window_size = params.window_size;
        let seed = params.seed.unwrap_or_else(rng::next_seed);

        Ok(Self {
            stretch_ratio: params.stretch_ratio,
            window_size,
            input_history: vec![0.0; window_size * STARTUP_BLOCKS],
            output_block: vec![0.0; window_size],
            previous_grain: vec![0.0; window_size],
            workspace: vec![0.0; window_size * 2],
            transform: SpectralTransform::new(window_size * 2),
            rng: PhaseRng::new(seed),
            crossfade: crossfade_curve(window_size),
            shaping: shaping_curve(window_size),
            startup_remaining: STARTUP_BLOCKS,
            position: 0.0,
            output_ready: false,
            needs_input: true,
        })
    }

    /// Returns the engine's block size in samples.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the configured stretch ratio.
    #[inline]
    pub fn stretch_ratio(&self) -> f64 {
        self.stretch_ratio
    }

    /// Ingests one input block of exactly `window_size` samples.
    ///
    /// Legal only when all pending output has been drained; call
    /// [`read`](Self::read) until it returns `None` between writes.
    /// The first two writes only fill the input history and produce no
    /// output.
    ///
    /// # Errors
    ///
    /// [`StretchError::WriteOutOfTurn`] if output is still pending, and
    /// [`StretchError::BlockSize`] if the block length is wrong.
    pub fn write(&mut self, block: &[f32]) -> Result<(), StretchError> {
        if self.output_ready || !self.needs_input {
            return Err(StretchError::WriteOutOfTurn);
        }
        if block.len() != self.window_size {
            return Err(StretchError::BlockSize {
                provided: block.len(),
                expected: self.window_size,
            });
        }

        let w = self.window_size;
        if self.startup_remaining > 0 {
            let slot = STARTUP_BLOCKS - self.startup_remaining;
            self.input_history[slot * w..(slot + 1) * w].copy_from_slice(block);
            self.startup_remaining -= 1;
            if self.startup_remaining > 0 {
                return Ok(());
            }
        } else {
            self.input_history.copy_within(w.., 0);
            self.input_history[2 * w..].copy_from_slice(block);
        }

        self.process_step();
        self.output_ready = true;
        Ok(())
    }

    /// Returns the next stretched output block, or `None` when a new input
    /// block is required.
    ///
    /// When the current window still has output left to yield (ratios
    /// above the per-block advance), this reruns the processing step on
    /// the buffered history without consuming new input. The returned
    /// slice points into engine-owned memory and is overwritten by the
    /// next call.
    pub fn read(&mut self) -> Option<&[f32]> {
        if self.output_ready {
            self.output_ready = false;
            return Some(&self.output_block);
        }
        if !self.needs_input && self.startup_remaining == 0 {
            self.process_step();
            return Some(&self.output_block);
        }
        None
    }

    /// Runs one analysis/resynthesis step over the buffered history.
    fn process_step(&mut self) {
        let w = self.window_size;

        // Grain extraction at the fractional window position.
        let start = ((self.position * w as f64).floor() as usize).min(w - 1);
        self.workspace
            .copy_from_slice(&self.input_history[start..start + 2 * w]);

        self.transform.apply_window(&mut self.workspace);
        self.transform.analyze(&self.workspace);
        self.transform.synthesize(&mut self.rng, &mut self.workspace);

        // Cross-fade the new grain's second half against the previous
        // grain's first half, shape, amplify, and hard-clip.
        for i in 0..w {
            let fade = self.crossfade[i];
            let blended =
                self.workspace[w + i] * (1.0 - fade) + self.previous_grain[i] * fade;
            let val = blended * self.shaping[i] * AMPLIFICATION;
            self.output_block[i] = val.clamp(-1.0, 1.0);
        }

        // The next step blends against this grain's un-faded first half.
        self.previous_grain.copy_from_slice(&self.workspace[..w]);

        self.position += 1.0 / self.stretch_ratio;
        if self.position >= 1.0 {
            self.position -= self.position.floor();
            self.needs_input = true;
        } else {
            self.needs_input = false;
        }
    }
}
