//! Error types for the diverging color map core.
//!
//! The colorimetric algorithm itself never fails: domain errors are guarded
//! against and out-of-gamut colors are reported as diagnostics. These errors
//! cover the surrounding surfaces: parsing colors, presets, configuration,
//! sampling and output.

use thiserror::Error;

/// Errors produced by color parsing, configuration and sampling.
#[derive(Debug, Error)]
pub enum DivergeError {
    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A map configuration could not be parsed or is incomplete.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A working space name was not recognized.
    #[error("unknown working space: {0}")]
    UnknownSpace(String),

    /// A sample table was requested with too few rows to include both endpoints.
    #[error("invalid sample count {0}: at least 2 samples are required")]
    InvalidSampleCount(usize),

    /// Width or height of a swatch was zero or overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An I/O error occurred while writing output.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DivergeError {
    fn from(e: std::io::Error) -> Self {
        DivergeError::Io(e.to_string())
    }
}
