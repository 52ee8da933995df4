use crate::entry::CacheEntry;
use crate::ops::BatchReport;
use std::fs;

/// Removes each selected entry's file from disk.
///
/// Irreversible — there are no trash semantics. Confirming destructive
/// intent is the caller's job; by the time this runs, the decision has
/// been made.
///
/// A file that no longer exists is a per-item failure with a
/// descriptive message; it never blocks deletion of the remaining
/// selection, and nothing here raises.
pub fn delete(entries: &[CacheEntry]) -> BatchReport {
    let mut report = BatchReport::default();
    for entry in entries {
        match fs::remove_file(&entry.path) {
            Ok(()) => {
                tracing::info!(path = %entry.path.display(), "deleted");
                report.succeeded.push(entry.path.clone());
            },
            Err(e) => {
                tracing::error!(path = %entry.path.display(), error = %e, "delete failed");
                report.failed.push((entry.path.clone(), e.to_string()));
            },
        }
    }
    report
}
