use crate::entry::CacheEntry;
use crate::scan::error::{ErrorKind, Result as ScanResult};
use exn::ResultExt;
use modcache_extract::extract_version;
use std::fs::Metadata;
use std::path::Path;
use time::OffsetDateTime;

/// Builds the inventory entry for a single archive file.
///
/// Size and mtime come from the filesystem; the version comes from
/// [`extract_version`], whose failures never propagate — an archive with
/// unreadable metadata still gets an entry, with the version unknown.
///
/// # Errors
///
/// Returns [`ErrorKind::Stat`] when the file itself cannot be read,
/// typically because it vanished between discovery and here.
pub fn scan_file(path: impl AsRef<Path>) -> ScanResult<CacheEntry> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).or_raise(|| ErrorKind::Stat(path.to_path_buf()))?;
    Ok(entry_from_metadata(path, &metadata))
}

/// Shared by [`scan_file`] and the directory walk, which already holds
/// the metadata for each entry it visits.
pub(crate) fn entry_from_metadata(path: &Path, metadata: &Metadata) -> CacheEntry {
    let display_name = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or_default().to_string();
    // Not every filesystem reports mtimes; the epoch stands in.
    let modified = metadata.modified().map(OffsetDateTime::from).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    CacheEntry {
        path: path.to_path_buf(),
        display_name,
        size: metadata.len(),
        modified,
        version: extract_version(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn jar_bytes(manifest: Option<&str>) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("content.bin", options).unwrap();
        writer.write_all(b"payload").unwrap();
        if let Some(manifest) = manifest {
            writer.start_file("META-INF/mods.toml", options).unwrap();
            writer.write_all(manifest.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_scan_file_with_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Alpha.jar");
        let bytes = jar_bytes(Some("[[mods]]\nversion = \"1.2.3\"\n"));
        std::fs::write(&path, &bytes).unwrap();

        let entry = scan_file(&path).unwrap();
        assert_eq!(entry.display_name, "Alpha");
        assert_eq!(entry.file_name(), "Alpha.jar");
        assert_eq!(entry.size, bytes.len() as u64);
        assert_eq!(entry.version.unwrap().as_str(), "1.2.3");
    }

    #[test]
    fn test_scan_file_without_metadata_still_yields_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bare.jar");
        std::fs::write(&path, jar_bytes(None)).unwrap();

        let entry = scan_file(&path).unwrap();
        assert_eq!(entry.display_name, "Bare");
        assert_eq!(entry.version, None);
    }

    #[test]
    fn test_scan_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_file(dir.path().join("gone.jar")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Stat(_)));
    }
}
