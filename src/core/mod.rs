//! Core types, window curves, and phase randomization.

pub mod rng;
pub mod types;
pub mod window;

pub use rng::PhaseRng;
pub use types::*;
