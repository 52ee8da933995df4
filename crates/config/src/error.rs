//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic
//! location tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// A configuration failure aborts the operation that needed the settings;
/// it is never fatal to the process, and prior in-memory settings stay
/// untouched.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The settings file exists but could not be read or merged.
    #[display("cannot read settings from {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    /// The settings file or an environment override holds a value of the
    /// wrong shape (e.g. a non-numeric size cap).
    #[display("invalid settings value")]
    Invalid,
    /// The settings could not be rendered back to TOML.
    #[display("cannot serialize settings")]
    Serialize,
    /// The settings file could not be written.
    #[display("cannot write settings to {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Read(_) | ErrorKind::Write(_))
    }
}
