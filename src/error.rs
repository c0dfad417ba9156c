//! Error types for vyuha-nav

use thiserror::Error;

/// vyuha-nav error type
#[derive(Error, Debug)]
pub enum NavError {
    /// A grid accessor was reached with a cell index outside the map.
    ///
    /// Public entry points validate bounds before touching cell storage, so
    /// seeing this error means an internal invariant was violated. The
    /// embedding control loop must treat it as fatal: stop the motors first,
    /// then report.
    #[error("cell ({x}, {y}) outside {width}x{height} map")]
    CellOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// A brick index beyond the current wall list length.
    #[error("brick index {index} out of range (len {len})")]
    BrickIndexOutOfRange { index: usize, len: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
