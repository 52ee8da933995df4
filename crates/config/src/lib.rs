//! Settings loading and persistence.
//!
//! The tool keeps exactly two scalar settings — the cache directory and
//! an advisory size cap — in a `[settings]` table of a small TOML file.
//! Loading merges that file with `MODCACHE_*` environment overrides via
//! [`figment`]; saving is always a full rewrite of the file, so the two
//! must round-trip losslessly.

pub mod error;
mod settings;

pub use crate::settings::{Settings, default_config_path, load, save};
