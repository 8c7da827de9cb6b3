//! Raw float32 little-endian sample streams.
//!
//! The headerless format used by `ffmpeg -f f32le` and raw exports from
//! audio editors: consecutive f32 samples, no container.

use crate::error::StretchError;
use std::io::{Read, Write};

/// Reads fixed-size blocks of f32le samples from an underlying reader.
pub struct BlockReader<R: Read> {
    inner: R,
    block_size: usize,
    byte_buf: Vec<u8>,
}

impl<R: Read> BlockReader<R> {
    /// Creates a reader yielding `block_size` samples per block.
    pub fn new(inner: R, block_size: usize) -> Self {
        Self {
            inner,
            block_size,
            byte_buf: vec![0u8; block_size * 4],
        }
    }

    /// Reads the next full block into `block`.
    ///
    /// Returns `Ok(false)` on a clean end of stream or a trailing partial
    /// block (the partial tail is discarded, matching the reference
    /// example's behavior).
    pub fn read_block(&mut self, block: &mut [f32]) -> Result<bool, StretchError> {
        debug_assert_eq!(block.len(), self.block_size);
        let mut filled = 0;
        while filled < self.byte_buf.len() {
            match self.inner.read(&mut self.byte_buf[filled..]) {
                Ok(0) => return Ok(false),
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        for (sample, bytes) in block.iter_mut().zip(self.byte_buf.chunks_exact(4)) {
            *sample = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        Ok(true)
    }
}

/// Writes blocks of f32le samples to an underlying writer.
pub struct BlockWriter<W: Write> {
    inner: W,
}

impl<W: Write> BlockWriter<W> {
    /// Creates a writer over `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Writes all samples in `block` as f32le.
    pub fn write_block(&mut self, block: &[f32]) -> Result<(), StretchError> {
        for &sample in block {
            self.inner.write_all(&sample.to_le_bytes())?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<(), StretchError> {
        self.inner.flush()?;
        Ok(())
    }
}
