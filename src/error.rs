//! Error types for the paulstretch crate.

use std::fmt;

/// Errors that can occur while building or driving a stretcher.
#[derive(Debug, Clone, PartialEq)]
pub enum StretchError {
    /// Stretch ratio was not finite or was below 1.0.
    InvalidRatio(f64),
    /// Window size too small for spectral processing.
    InvalidWindowSize(usize),
    /// A written block did not match the engine's window size.
    BlockSize { provided: usize, expected: usize },
    /// `write` was called while buffered output was still pending.
    WriteOutOfTurn,
    /// Invalid audio file format.
    InvalidFormat(String),
    /// I/O error.
    IoError(String),
    /// Input contained NaN or infinite samples.
    NonFiniteInput,
}

impl fmt::Display for StretchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StretchError::InvalidRatio(ratio) => {
                write!(f, "invalid stretch ratio: {} (must be >= 1.0)", ratio)
            }
            StretchError::InvalidWindowSize(size) => {
                write!(f, "invalid window size: {} (must be >= 2)", size)
            }
            StretchError::BlockSize { provided, expected } => {
                write!(
                    f,
                    "block size mismatch: {} samples provided, {} expected",
                    provided, expected
                )
            }
            StretchError::WriteOutOfTurn => {
                write!(f, "write called before pending output was drained")
            }
            StretchError::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            StretchError::IoError(msg) => write!(f, "I/O error: {}", msg),
            StretchError::NonFiniteInput => write!(f, "input contains NaN or infinite samples"),
        }
    }
}

impl std::error::Error for StretchError {}

impl From<std::io::Error> for StretchError {
    fn from(err: std::io::Error) -> Self {
        StretchError::IoError(err.to_string())
    }
}
