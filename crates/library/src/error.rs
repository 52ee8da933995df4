//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic
//! location tracking and error tree construction. Module-level error
//! kinds are raised into the operation-level kinds below at the public
//! boundary, so callers match one variant per entry point while the
//! full tree stays available for diagnostics.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which engine entry point failed outright.
///
/// Per-item failures inside a bulk operation never surface here — they
/// are accumulated in [`BatchReport`](crate::BatchReport). These kinds
/// cover the cases where the operation could not run at all.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The rescan could not produce an inventory; the previous one is
    /// still valid.
    #[display("cache scan failed")]
    Scan,
    /// Import could not start (destination unavailable).
    #[display("import failed before any items could be attempted")]
    Import,
    /// Export could not start (destination unavailable).
    #[display("export failed before any items could be attempted")]
    Export,
    /// The single transactional export-as-archive write failed.
    #[display("export-as-archive failed")]
    Bundle,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            _ => false,
        }
    }
}
