//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: map error (bad sample count, bad swatch dimensions)
//! - 11: I/O error (config read, table or swatch write)
//! - 12: input error (bad hex color, unknown preset or space, bad config)
//! - 13: serialization error

use diverge_core::DivergeError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A map-level error raised while sampling or rendering.
    Map(DivergeError),
    /// An I/O error (config read, table or swatch write).
    Io(String),
    /// A user input error (bad color, preset, space or config).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Map(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Map(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<DivergeError> for CliError {
    fn from(e: DivergeError) -> Self {
        match e {
            DivergeError::Io(msg) => CliError::Io(msg),
            e @ (DivergeError::InvalidColor(_)
            | DivergeError::UnknownPreset(_)
            | DivergeError::InvalidConfig(_)
            | DivergeError::UnknownSpace(_)) => CliError::Input(e.to_string()),
            other => CliError::Map(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
