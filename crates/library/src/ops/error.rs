//! Error types for the [`ops`](super) module.
//!
//! Uses [`exn`] for automatic location tracking and error tree
//! construction. These cover only whole-operation failures; per-item
//! problems land in [`BatchReport::failed`](super::BatchReport) as
//! rendered messages instead.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An operations error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for bulk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies a whole-operation failure.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The destination directory could not be created.
    #[display("destination unavailable: {}", _0.display())]
    Destination(#[error(not(source))] PathBuf),
    /// Two selected files share a base name; bundling both would
    /// silently drop one.
    #[display("duplicate archive name in selection: {_0}")]
    DuplicateName(#[error(not(source))] String),
    /// Creating, filling or finishing the bundle archive failed.
    #[display("cannot write bundle: {}", _0.display())]
    BundleWrite(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A duplicate name needs a different selection, not a retry.
        !matches!(self, ErrorKind::DuplicateName(_))
    }
}
