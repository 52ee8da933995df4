//! Mod archive metadata extraction.
//!
//! A mod archive is a zip-compatible container carrying its own manifest:
//! a TOML document under the `META-INF/` directory that declares, among
//! other things, the mod's version. This crate reads exactly one slice of
//! that manifest — the `version` field of the first `[[mods]]` table —
//! and models nothing else.
//!
//! The public boundary is [`extract_version`], which never raises: any
//! failure (unreadable file, not a zip, missing or malformed manifest,
//! placeholder version) is logged at warning level and collapses to
//! `None`. The inner [`read_version`] keeps the typed error for callers
//! that need to distinguish the cases.

pub mod consts;
pub mod error;
mod extract;
pub mod models;

pub use crate::extract::{extract_version, read_version};
pub use crate::models::ModVersion;
