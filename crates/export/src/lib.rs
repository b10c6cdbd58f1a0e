#![deny(unsafe_code)]
//! Output formats for diverging color maps: sampled CSV/JSON tables and
//! gradient swatches.
//!
//! Both the CLI and library callers go through this crate so the display
//! policy (clamping, byte rounding) lives in one place.

pub mod pixel;
pub mod table;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::swatch_to_rgba;
pub use table::{sample_rows, write_csv, Channels, Row, DEFAULT_SAMPLE_COUNTS};
