use crate::entry::CacheEntry;
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::ops::error::{ErrorKind, Result as OpsResult};
use exn::ResultExt;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Bundles the selected entries into one new deflate-compressed zip
/// archive at `dest_file`, each entry stored under its base file name.
///
/// Unlike the other bulk operations this is transactional: the first
/// failure aborts the whole call with a single error, and a partially
/// written archive is removed on a best-effort basis. Selections where
/// two files share a base name are rejected up front — writing both
/// would silently drop one.
///
/// # Errors
///
/// Returns [`LibraryErrorKind::Bundle`] over the underlying cause
/// (duplicate names, or any create/read/write failure).
pub fn bundle(entries: &[CacheEntry], dest_file: impl AsRef<Path>) -> LibraryResult<()> {
    bundle_inner(entries, dest_file.as_ref()).or_raise(|| LibraryErrorKind::Bundle)
}

fn bundle_inner(entries: &[CacheEntry], dest_file: &Path) -> OpsResult<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.file_name()) {
            exn::bail!(ErrorKind::DuplicateName(entry.file_name().to_string()));
        }
    }

    let file = fs::File::create(dest_file).or_raise(|| ErrorKind::BundleWrite(dest_file.to_path_buf()))?;
    match write_bundle(entries, dest_file, file) {
        Ok(()) => {
            tracing::info!(archives = entries.len(), dest = %dest_file.display(), "bundle written");
            Ok(())
        },
        Err(e) => {
            // Leave no partial archive behind; the unlink outcome is not
            // worth surfacing over the original failure.
            _ = fs::remove_file(dest_file);
            Err(e)
        },
    }
}

fn write_bundle(entries: &[CacheEntry], dest_file: &Path, file: fs::File) -> OpsResult<()> {
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for entry in entries {
        writer.start_file(entry.file_name(), options).or_raise(|| ErrorKind::BundleWrite(entry.path.clone()))?;
        let mut source = fs::File::open(&entry.path).or_raise(|| ErrorKind::BundleWrite(entry.path.clone()))?;
        io::copy(&mut source, &mut writer).or_raise(|| ErrorKind::BundleWrite(entry.path.clone()))?;
    }
    writer.finish().or_raise(|| ErrorKind::BundleWrite(dest_file.to_path_buf()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use time::OffsetDateTime;
    use zip::ZipArchive;

    fn entry_for(path: PathBuf) -> CacheEntry {
        CacheEntry {
            display_name: path.file_stem().unwrap().to_str().unwrap().to_string(),
            path,
            size: 0,
            modified: OffsetDateTime::UNIX_EPOCH,
            version: None,
        }
    }

    fn entries_in(dir: &Path, names: &[&str]) -> Vec<CacheEntry> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                fs::write(&path, format!("payload of {name}")).unwrap();
                entry_for(path)
            })
            .collect()
    }

    #[test]
    fn test_bundle_contains_sources_under_base_names() {
        let cache = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let entries = entries_in(cache.path(), &["a.jar", "b.jar"]);
        let dest = out.path().join("mods.zip");

        bundle(&entries, &dest).unwrap();

        let mut archive = ZipArchive::new(fs::File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut body = String::new();
        io::Read::read_to_string(&mut archive.by_name("a.jar").unwrap(), &mut body).unwrap();
        assert_eq!(body, "payload of a.jar");
    }

    #[test]
    fn test_bundle_rejects_duplicate_base_names() {
        let cache = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let sub = cache.path().join("other");
        fs::create_dir(&sub).unwrap();
        let mut entries = entries_in(cache.path(), &["same.jar"]);
        entries.extend(entries_in(&sub, &["same.jar"]));
        let dest = out.path().join("mods.zip");

        let err = bundle(&entries, &dest).unwrap_err();
        assert!(matches!(&*err, LibraryErrorKind::Bundle));
        // Rejected before any bytes hit the disk.
        assert!(!dest.exists());
    }

    #[test]
    fn test_bundle_vanished_source_aborts_whole_call() {
        let cache = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let mut entries = entries_in(cache.path(), &["a.jar"]);
        entries.push(entry_for(cache.path().join("ghost.jar")));
        let dest = out.path().join("mods.zip");

        assert!(bundle(&entries, &dest).is_err());
        // The partial archive was cleaned up.
        assert!(!dest.exists());
    }

    #[test]
    fn test_bundle_of_empty_selection_is_an_empty_archive() {
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("empty.zip");
        bundle(&[], &dest).unwrap();
        let archive = ZipArchive::new(fs::File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
