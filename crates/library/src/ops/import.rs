use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::ops::BatchReport;
use crate::ops::error::{ErrorKind, Result as OpsResult};
use exn::ResultExt;
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};

/// How a name collision at the import destination gets resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Replace the existing file.
    Overwrite,
    /// Leave the existing file; the incoming one is recorded as skipped.
    Skip,
    /// Stop the whole import immediately. Items already copied stay
    /// copied; there is no rollback.
    CancelAll,
}

/// Decides collisions on behalf of whoever drives the engine.
///
/// The engine never prompts. An interactive front-end implements this
/// with a dialog or stdin prompt; scripts use [`AlwaysOverwrite`] or
/// [`AlwaysSkip`]. Any `FnMut(&Path, &Path) -> ConflictChoice` works
/// as well.
pub trait ConflictResolver {
    /// Called once per collision with the incoming source path and the
    /// existing destination file.
    fn resolve(&mut self, incoming: &Path, existing: &Path) -> ConflictChoice;
}

impl<F: FnMut(&Path, &Path) -> ConflictChoice> ConflictResolver for F {
    fn resolve(&mut self, incoming: &Path, existing: &Path) -> ConflictChoice {
        self(incoming, existing)
    }
}

/// Resolves every collision as [`ConflictChoice::Overwrite`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;
impl ConflictResolver for AlwaysOverwrite {
    fn resolve(&mut self, _: &Path, _: &Path) -> ConflictChoice {
        ConflictChoice::Overwrite
    }
}

/// Resolves every collision as [`ConflictChoice::Skip`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSkip;
impl ConflictResolver for AlwaysSkip {
    fn resolve(&mut self, _: &Path, _: &Path) -> ConflictChoice {
        ConflictChoice::Skip
    }
}

/// Copies `sources` into `dest_dir`, one at a time.
///
/// Name collisions are put to the `resolver`; everything else is
/// per-item accounting in the returned [`BatchReport`]. The destination
/// directory is created on demand.
///
/// # Errors
///
/// Returns [`LibraryErrorKind::Import`] only when the destination
/// directory cannot be created — after that point failures are
/// per-item, never whole-call.
pub fn import(
    sources: &[PathBuf],
    dest_dir: impl AsRef<Path>,
    resolver: &mut dyn ConflictResolver,
) -> LibraryResult<BatchReport> {
    import_inner(sources, dest_dir.as_ref(), resolver).or_raise(|| LibraryErrorKind::Import)
}

fn import_inner(sources: &[PathBuf], dest_dir: &Path, resolver: &mut dyn ConflictResolver) -> OpsResult<BatchReport> {
    fs::create_dir_all(dest_dir).or_raise(|| ErrorKind::Destination(dest_dir.to_path_buf()))?;
    let mut report = BatchReport::default();
    for source in sources {
        let Some(name) = source.file_name() else {
            report.failed.push((source.clone(), "source has no file name".to_string()));
            continue;
        };
        let dest = dest_dir.join(name);
        if dest.exists() {
            match resolver.resolve(source, &dest) {
                ConflictChoice::Overwrite => {},
                ConflictChoice::Skip => {
                    tracing::info!(source = %source.display(), "import skipped, destination exists");
                    report.skipped.push(source.clone());
                    continue;
                },
                ConflictChoice::CancelAll => {
                    tracing::info!("import cancelled, remaining items not attempted");
                    report.cancelled = true;
                    break;
                },
            }
        }
        match copy_preserving(source, &dest) {
            Ok(()) => {
                tracing::info!(source = %source.display(), dest = %dest.display(), "imported");
                report.succeeded.push(source.clone());
            },
            Err(e) => {
                tracing::error!(source = %source.display(), error = %e, "import failed");
                report.failed.push((source.clone(), e.to_string()));
            },
        }
    }
    Ok(report)
}

/// Copy that carries the source mtime over to the destination, where
/// the platform allows it. A failed mtime transfer degrades to a
/// warning; the copy itself already happened.
pub(crate) fn copy_preserving(source: &Path, dest: &Path) -> std::io::Result<()> {
    fs::copy(source, dest)?;
    let metadata = fs::metadata(source)?;
    if let Err(e) = filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&metadata)) {
        tracing::warn!(dest = %dest.display(), error = %e, "could not preserve modification time");
    }
    Ok(())
}
