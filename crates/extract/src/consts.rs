//! Reserved names inside and around a mod archive.

use std::path::Path;

/// Directory prefix under which mod manifests live inside the container.
pub const METADATA_DIR: &str = "META-INF/";
/// Extension of manifest entries beneath [`METADATA_DIR`].
pub const METADATA_EXT: &str = ".toml";
/// File extension (lowercase, without dot) of archives eligible for the
/// cache inventory.
pub const ARCHIVE_EXT: &str = "jar";

/// Returns `true` if `name` (a path inside the container, as listed) is a
/// manifest entry this crate should parse.
pub(crate) fn is_metadata_entry(name: &str) -> bool {
    name.starts_with(METADATA_DIR) && name.ends_with(METADATA_EXT)
}

/// Returns `true` if `path` names an archive eligible for the inventory.
///
/// The extension match is case-insensitive, so `Mod.JAR` counts.
#[must_use]
pub fn is_archive_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXT))
}
