use modcache_extract::ModVersion;
use std::path::PathBuf;
use time::OffsetDateTime;

/// One archive file on disk, as seen by the most recent rescan.
///
/// Entries are immutable snapshots: rebuilt wholesale on every rescan,
/// never patched in place. Within a scan the `path` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Location as discovered by the scan.
    pub path: PathBuf,
    /// File stem — the file name minus the archive extension.
    pub display_name: String,
    /// Byte length at scan time.
    pub size: u64,
    /// Filesystem mtime at scan time.
    pub modified: OffsetDateTime,
    /// Declared version, when the archive metadata yields one. `None`
    /// covers missing, malformed and placeholder metadata alike.
    pub version: Option<ModVersion>,
}

impl CacheEntry {
    /// The raw file name. Search matches against it, and export/bundle
    /// name their copies after it.
    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|name| name.to_str()).unwrap_or_default()
    }
}
