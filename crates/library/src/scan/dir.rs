use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::inventory::Inventory;
use crate::scan::error::{ErrorKind, Result as ScanResult};
use crate::scan::file::entry_from_metadata;
use exn::ResultExt;
use modcache_extract::consts::is_archive_path;
use std::fs;
use std::path::Path;
use tracing::instrument;
use walkdir::WalkDir;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Everything a full rescan produces.
#[derive(Debug)]
pub struct ScanOutcome {
    /// One entry per discovered archive, in walk order.
    pub inventory: Inventory,
    /// Total size of **every** file under the root, archives or not.
    /// This is the number the budget is checked against.
    pub total_size: u64,
    /// Advisory: a non-zero budget is configured and `total_size`
    /// exceeds it. Nothing is evicted on the engine's initiative.
    pub over_budget: bool,
}

/// Rebuilds the inventory from disk.
///
/// The root is created (including parents) when absent; failing to
/// create or walk it is fatal to this rescan and surfaced to the
/// caller. Individual files are never fatal: an unreadable file is
/// logged and skipped, and an archive with unreadable metadata still
/// appears with its version unknown.
///
/// `budget_mb` is the advisory size cap in megabytes; zero disables the
/// check entirely.
#[instrument(skip(root), fields(root = %root.as_ref().display()))]
pub fn rescan(root: impl AsRef<Path>, budget_mb: u64) -> LibraryResult<ScanOutcome> {
    rescan_inner(root.as_ref(), budget_mb).or_raise(|| LibraryErrorKind::Scan)
}

fn rescan_inner(root: &Path, budget_mb: u64) -> ScanResult<ScanOutcome> {
    if !root.exists() {
        fs::create_dir_all(root).or_raise(|| ErrorKind::CreateRoot(root.to_path_buf()))?;
        tracing::info!(root = %root.display(), "created cache directory");
    }

    let mut entries = Vec::new();
    let mut total_size = 0u64;
    for result in WalkDir::new(root) {
        let dirent = match result {
            Ok(dirent) => dirent,
            // Depth zero is the root itself; failing there means there
            // is nothing to scan.
            Err(e) if e.depth() == 0 => {
                return Err(e).or_raise(|| ErrorKind::RootInaccessible(root.to_path_buf()));
            },
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry during scan");
                continue;
            },
        };
        if !dirent.file_type().is_file() {
            continue;
        }
        let metadata = match dirent.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %dirent.path().display(), error = %e, "file vanished during scan");
                continue;
            },
        };
        total_size += metadata.len();
        if is_archive_path(dirent.path()) {
            entries.push(entry_from_metadata(dirent.path(), &metadata));
        }
    }

    let over_budget = budget_mb > 0 && total_size as f64 / BYTES_PER_MB > budget_mb as f64;
    if over_budget {
        tracing::warn!(total_size, budget_mb, "cache size exceeds configured budget");
    }
    tracing::info!(archives = entries.len(), total_size, "scan complete");
    Ok(ScanOutcome { inventory: Inventory::new(entries), total_size, over_budget })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::PathBuf;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn write_jar(dir: &Path, name: &str, manifest: Option<&str>) -> PathBuf {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        if let Some(manifest) = manifest {
            writer.start_file("META-INF/mods.toml", options).unwrap();
            writer.write_all(manifest.as_bytes()).unwrap();
        } else {
            writer.start_file("assets/blank.txt", options).unwrap();
            writer.write_all(b"no manifest here").unwrap();
        }
        let path = dir.join(name);
        std::fs::write(&path, writer.finish().unwrap().into_inner()).unwrap();
        path
    }

    #[test]
    fn test_rescan_indexes_archives_with_and_without_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write_jar(dir.path(), "A.jar", Some("[[mods]]\nversion = \"1.2.3\"\n"));
        write_jar(dir.path(), "B.jar", None);

        let outcome = rescan(dir.path(), 0).unwrap();
        assert_eq!(outcome.inventory.len(), 2);
        let a = outcome.inventory.iter().find(|e| e.display_name == "A").unwrap();
        assert_eq!(a.version.as_ref().unwrap().as_str(), "1.2.3");
        let b = outcome.inventory.iter().find(|e| e.display_name == "B").unwrap();
        assert_eq!(b.version, None);
    }

    #[test]
    fn test_rescan_placeholder_version_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        write_jar(dir.path(), "Tpl.jar", Some("[[mods]]\nversion = \"${project.version}\"\n"));

        let outcome = rescan(dir.path(), 0).unwrap();
        assert_eq!(outcome.inventory.entries()[0].version, None);
    }

    #[test]
    fn test_rescan_recurses_and_matches_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("packs/old");
        fs::create_dir_all(&nested).unwrap();
        write_jar(&nested, "Deep.JAR", None);
        write_jar(dir.path(), "Top.jar", None);
        std::fs::write(dir.path().join("notes.txt"), b"not an archive").unwrap();

        let outcome = rescan(dir.path(), 0).unwrap();
        assert_eq!(outcome.inventory.len(), 2);
    }

    #[test]
    fn test_total_size_counts_every_file_not_just_archives() {
        let dir = tempfile::tempdir().unwrap();
        let jar = write_jar(dir.path(), "A.jar", None);
        let jar_size = fs::metadata(&jar).unwrap().len();
        std::fs::write(dir.path().join("leftover.txt"), vec![0u8; 4096]).unwrap();

        let outcome = rescan(dir.path(), 0).unwrap();
        assert_eq!(outcome.total_size, jar_size + 4096);
        assert_eq!(outcome.inventory.entries_size(), jar_size);
    }

    #[test]
    fn test_rescan_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("does/not/exist/yet");

        let outcome = rescan(&root, 0).unwrap();
        assert!(root.is_dir());
        assert!(outcome.inventory.is_empty());
        assert_eq!(outcome.total_size, 0);
    }

    #[test]
    fn test_rescan_uncreatable_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"a file, not a directory").unwrap();

        // Creating a directory underneath a regular file cannot work.
        let err = rescan(blocker.join("cache"), 0).unwrap_err();
        assert!(matches!(&*err, LibraryErrorKind::Scan));
    }

    #[test]
    fn test_budget_flag() {
        let dir = tempfile::tempdir().unwrap();
        // 1.5 MB of content against a 1 MB budget.
        std::fs::write(dir.path().join("bulk.bin"), vec![0u8; 1_572_864]).unwrap();

        let over = rescan(dir.path(), 1).unwrap();
        assert!(over.over_budget);
        // A zero budget never flags, whatever the size.
        let unlimited = rescan(dir.path(), 0).unwrap();
        assert!(!unlimited.over_budget);
        // A roomy budget doesn't flag either.
        let roomy = rescan(dir.path(), 2).unwrap();
        assert!(!roomy.over_budget);
    }
}
