use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the settings document.
pub const SETTINGS_FILE: &str = "modcache.toml";
/// Prefix for environment variable overrides, e.g. `MODCACHE_CACHE_DIR`.
const ENV_PREFIX: &str = "MODCACHE_";
/// Default cache directory, a hidden folder relative to where the tool
/// is run.
const DEFAULT_CACHE_DIR: &str = ".modcache";

/// The two persisted settings.
///
/// Loaded once at startup and owned by the engine; the file on disk is
/// only consulted again on an explicit [`load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory scanned for mod archives.
    pub cache_dir: PathBuf,
    /// Advisory cap on the total size of everything under `cache_dir`,
    /// in megabytes. Zero disables the budget check.
    pub max_cache_size: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self { cache_dir: PathBuf::from(DEFAULT_CACHE_DIR), max_cache_size: 0 }
    }
}

/// On-disk shape: everything lives under one `[settings]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    settings: Settings,
}

/// Loads settings from `path`, creating a default file if none exists.
///
/// Values resolve in order: serde defaults, then the `[settings]` table
/// of the file, then `MODCACHE_*` environment variables.
///
/// # Errors
///
/// - [`ErrorKind::Write`] — no file existed and the default one could
///   not be created
/// - [`ErrorKind::Read`] — the file exists but could not be read
/// - [`ErrorKind::Invalid`] — a value has the wrong shape (e.g. a
///   non-numeric `max_cache_size`)
pub fn load(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        let defaults = Settings::default();
        save(path, &defaults)?;
        tracing::info!(path = %path.display(), "created default settings file");
        return Ok(defaults);
    }
    let content = fs::read_to_string(path).or_raise(|| ErrorKind::Read(path.to_path_buf()))?;
    let settings: Settings = Figment::new()
        .merge(Toml::string(&content))
        .focus("settings")
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .or_raise(|| ErrorKind::Invalid)?;
    tracing::info!(
        path = %path.display(),
        cache_dir = %settings.cache_dir.display(),
        max_cache_size = settings.max_cache_size,
        "settings loaded",
    );
    Ok(settings)
}

/// Writes `settings` to `path` as a full rewrite, creating parent
/// directories as needed.
pub fn save(path: impl AsRef<Path>, settings: &Settings) -> Result<()> {
    let path = path.as_ref();
    let document = SettingsFile { settings: settings.clone() };
    let rendered = toml::to_string_pretty(&document).or_raise(|| ErrorKind::Serialize)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).or_raise(|| ErrorKind::Write(path.to_path_buf()))?;
    }
    fs::write(path, rendered).or_raise(|| ErrorKind::Write(path.to_path_buf()))?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

/// Platform-appropriate location for the settings file, falling back to
/// the working directory when no home directory can be determined.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "modcache")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}
