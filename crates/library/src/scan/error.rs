//! Error types for the [`scan`](super) module.
//!
//! Uses [`exn`] for automatic location tracking and error tree
//! construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A scan error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a scan failure.
///
/// Only root-level problems are errors; anything wrong with an
/// individual file is degraded to a warning and the scan continues.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The cache root did not exist and could not be created.
    #[display("cannot create cache directory {}", _0.display())]
    CreateRoot(#[error(not(source))] PathBuf),
    /// The cache root exists but cannot be walked at all.
    #[display("cache directory inaccessible: {}", _0.display())]
    RootInaccessible(#[error(not(source))] PathBuf),
    /// A file's metadata could not be read.
    #[display("cannot stat {}", _0.display())]
    Stat(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Another process mutating the cache directory mid-scan shows up
        // as these two; the next rescan may well succeed.
        matches!(self, ErrorKind::RootInaccessible(_) | ErrorKind::Stat(_))
    }
}
