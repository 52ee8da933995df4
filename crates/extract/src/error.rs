//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic
//! location tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. Every variant here collapses to "version unknown" at the
/// [`extract_version`](crate::extract_version) boundary.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be opened as a zip-compatible container.
    #[display("not a readable zip container")]
    InvalidContainer,
    /// No manifest entry under the reserved metadata directory.
    #[display("no metadata entry under META-INF/")]
    NoMetadata,
    /// The manifest entry exists but could not be read or decoded.
    #[display("metadata entry could not be read")]
    UnreadableEntry,
    /// The manifest is not a valid TOML document.
    #[display("malformed metadata document")]
    Malformed,
    /// The document parsed but carries no usable `version` field.
    #[display("metadata declares no version")]
    MissingVersion,
    /// The declared version still contains an unresolved build-time
    /// variable and therefore describes the build template, not a build.
    #[display("version is an unresolved placeholder: {_0}")]
    Placeholder(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A fresh read of a half-written entry may succeed; everything
        // else is a property of the archive itself.
        matches!(self, ErrorKind::UnreadableEntry)
    }
}
