//! Bulk file operations: import, export, export-as-archive, delete.
//!
//! Every operation takes an explicit selection and reports per-item
//! outcomes in a [`BatchReport`]. None of them rescan on completion —
//! the caller refreshes the inventory once it is done mutating disk.

mod bundle;
mod delete;
pub(crate) mod error;
mod export;
mod import;

pub use self::bundle::bundle;
pub use self::delete::delete;
pub use self::export::export;
pub use self::import::{AlwaysOverwrite, AlwaysSkip, ConflictChoice, ConflictResolver, import};

use std::path::PathBuf;

/// Per-item accounting for a bulk operation.
///
/// Bulk operations are not atomic across the batch: items are attempted
/// independently and one failure never aborts its siblings. The one
/// early exit is import's cancel-all choice, recorded in `cancelled`;
/// items already processed stay done (no rollback).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Items that completed. Import records the source path; export and
    /// delete record the entry path.
    pub succeeded: Vec<PathBuf>,
    /// Import conflicts resolved as "skip" — deliberately neither
    /// succeeded nor failed.
    pub skipped: Vec<PathBuf>,
    /// Items that failed, each with a rendered reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Import stopped early on a cancel-all choice; items after the
    /// cancellation point were never attempted.
    pub cancelled: bool,
}

impl BatchReport {
    /// `true` when every item went through: nothing failed, nothing was
    /// skipped, nothing was cut off by a cancellation.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty() && !self.cancelled
    }
}
