//! Sensor stream denoising.

pub mod history;

pub use history::{ReadingHistory, INVALID_READING};
