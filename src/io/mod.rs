//! File I/O glue: WAV containers and raw float32 sample streams.

pub mod raw;
pub mod wav;
