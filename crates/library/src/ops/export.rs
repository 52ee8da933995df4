use crate::entry::CacheEntry;
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::ops::BatchReport;
use crate::ops::error::{ErrorKind, Result as OpsResult};
use crate::ops::import::copy_preserving;
use exn::ResultExt;
use std::fs;
use std::path::Path;

/// Copies each selected entry into `dest_dir` under its original file
/// name, mtime preserved.
///
/// Existing files at the destination are overwritten without prompting;
/// unlike import there is no conflict resolution step.
///
/// # Errors
///
/// Returns [`LibraryErrorKind::Export`] only when the destination
/// directory cannot be created; everything after that is per-item
/// accounting in the [`BatchReport`].
pub fn export(entries: &[CacheEntry], dest_dir: impl AsRef<Path>) -> LibraryResult<BatchReport> {
    export_inner(entries, dest_dir.as_ref()).or_raise(|| LibraryErrorKind::Export)
}

fn export_inner(entries: &[CacheEntry], dest_dir: &Path) -> OpsResult<BatchReport> {
    fs::create_dir_all(dest_dir).or_raise(|| ErrorKind::Destination(dest_dir.to_path_buf()))?;
    let mut report = BatchReport::default();
    for entry in entries {
        let name = entry.file_name();
        if name.is_empty() {
            report.failed.push((entry.path.clone(), "entry has no file name".to_string()));
            continue;
        }
        let dest = dest_dir.join(name);
        match copy_preserving(&entry.path, &dest) {
            Ok(()) => {
                tracing::info!(source = %entry.path.display(), dest = %dest.display(), "exported");
                report.succeeded.push(entry.path.clone());
            },
            Err(e) => {
                tracing::error!(source = %entry.path.display(), error = %e, "export failed");
                report.failed.push((entry.path.clone(), e.to_string()));
            },
        }
    }
    Ok(report)
}
