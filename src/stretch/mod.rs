//! Spectral analysis and random-phase resynthesis.

pub mod transform;

pub use transform::SpectralTransform;
