use crate::error::{ErrorKind, Result};
use derive_more::Display;
use std::str::FromStr;

/// Marker character of an unresolved build-time variable, e.g. the
/// `${project.version}` a build pipeline failed to interpolate.
pub(crate) const PLACEHOLDER_MARKER: char = '$';

/// A declared mod version, as read from an archive manifest.
///
/// Construction enforces the placeholder rule: a version string still
/// containing [`PLACEHOLDER_MARKER`] is treated as unknown rather than a
/// real version, and is rejected with [`ErrorKind::Placeholder`].
///
/// No further structure is assumed — mods declare anything from semver
/// to dates to single words, so the value is kept as an opaque string.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct ModVersion(String);

impl ModVersion {
    /// Validate and wrap a raw version string.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Placeholder`] if the string contains `$`.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.contains(PLACEHOLDER_MARKER) {
            exn::bail!(ErrorKind::Placeholder(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModVersion {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
