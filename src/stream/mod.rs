//! Streaming write/read stretch engine.

pub mod stretcher;

pub use stretcher::Stretcher;
