//! Manifest lookup and version extraction.

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::ModVersion;
use exn::{OptionExt, ResultExt};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::instrument;
use zip::ZipArchive;

/// The narrow slice of a mod manifest this crate cares about. Everything
/// else in the document is ignored rather than modeled.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    mods: Vec<ModDecl>,
}

#[derive(Debug, Deserialize)]
struct ModDecl {
    version: Option<String>,
}

/// Reads the declared version out of an open archive.
///
/// Scans the container listing in order and parses the **first** entry
/// matching `META-INF/*.toml`; later manifests are never consulted, even
/// when the first one is broken.
///
/// # Errors
///
/// - [`ErrorKind::InvalidContainer`] — not a readable zip container
/// - [`ErrorKind::NoMetadata`] — no matching manifest entry
/// - [`ErrorKind::UnreadableEntry`] — entry corrupt or not UTF-8
/// - [`ErrorKind::Malformed`] — entry is not valid TOML
/// - [`ErrorKind::MissingVersion`] — no `mods` array, empty array, or no
///   `version` key on its first element
/// - [`ErrorKind::Placeholder`] — version contains an unresolved `$`
pub fn read_version<R: Read + Seek>(reader: R) -> Result<ModVersion> {
    let mut archive = ZipArchive::new(reader).or_raise(|| ErrorKind::InvalidContainer)?;
    let index = (0..archive.len())
        .find(|&i| archive.by_index(i).map(|entry| consts::is_metadata_entry(entry.name())).unwrap_or(false))
        .ok_or_raise(|| ErrorKind::NoMetadata)?;
    let mut document = String::new();
    archive
        .by_index(index)
        .or_raise(|| ErrorKind::UnreadableEntry)?
        .read_to_string(&mut document)
        .or_raise(|| ErrorKind::UnreadableEntry)?;
    let manifest: Manifest = toml::from_str(&document).or_raise(|| ErrorKind::Malformed)?;
    let declared = manifest
        .mods
        .into_iter()
        .next()
        .and_then(|decl| decl.version)
        .ok_or_raise(|| ErrorKind::MissingVersion)?;
    ModVersion::new(declared)
}

/// Extracts the declared version from an archive on disk.
///
/// This is the scan-facing boundary: it must never abort an inventory
/// rescan, so every failure — including an unopenable file — is logged at
/// warning level and reported as "version unknown".
#[instrument(level = "debug", skip_all)]
pub fn extract_version(path: impl AsRef<Path>) -> Option<ModVersion> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open archive for version extraction");
            return None;
        },
    };
    match read_version(file) {
        Ok(version) => Some(version),
        Err(e) => {
            let kind = &*e;
            tracing::warn!(path = %path.display(), error = %kind, "version extraction failed");
            None
        },
    }
}
