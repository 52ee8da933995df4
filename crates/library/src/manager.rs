use crate::entry::CacheEntry;
use crate::error::Result;
use crate::inventory::{Inventory, SortField};
use crate::ops::{self, BatchReport, ConflictResolver};
use crate::scan::{self, ScanOutcome};
use modcache_config::Settings;
use std::path::{Path, PathBuf};

/// The engine instance: owns the [`Settings`] and the [`Inventory`]
/// from the most recent rescan. Constructed once and handed to the
/// front-end — there is no ambient or static state anywhere.
///
/// Every method runs to completion on the calling thread. Bulk
/// operations only mutate the disk; the caller triggers
/// [`rescan`](Self::rescan) afterwards so the inventory reflects the
/// resulting state.
#[derive(Debug)]
pub struct ModCache {
    settings: Settings,
    inventory: Inventory,
    total_size: u64,
    over_budget: bool,
}

impl ModCache {
    /// Creates an engine with an empty inventory; call
    /// [`rescan`](Self::rescan) to populate it.
    pub fn new(settings: Settings) -> Self {
        Self { settings, inventory: Inventory::default(), total_size: 0, over_budget: false }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings. The inventory still describes the old
    /// root until the next [`rescan`](Self::rescan).
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Total size of everything under the cache root at the last
    /// rescan, archives or not.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Advisory budget flag from the last rescan. Never triggers
    /// eviction.
    pub fn over_budget(&self) -> bool {
        self.over_budget
    }

    /// Rebuilds the inventory from disk. On failure the previous
    /// inventory (and size accounting) is retained untouched.
    pub fn rescan(&mut self) -> Result<&Inventory> {
        let ScanOutcome { inventory, total_size, over_budget } =
            scan::rescan(&self.settings.cache_dir, self.settings.max_cache_size)?;
        self.inventory = inventory;
        self.total_size = total_size;
        self.over_budget = over_budget;
        Ok(&self.inventory)
    }

    /// See [`Inventory::filter`].
    pub fn search(&self, text: &str) -> Inventory {
        self.inventory.filter(text)
    }

    /// See [`Inventory::sort_by`].
    pub fn sort_by(&mut self, field: SortField) {
        self.inventory.sort_by(field);
    }

    /// Imports `sources` into the configured cache directory; see
    /// [`ops::import`].
    pub fn import(&self, sources: &[PathBuf], resolver: &mut dyn ConflictResolver) -> Result<BatchReport> {
        ops::import(sources, &self.settings.cache_dir, resolver)
    }

    /// See [`ops::export`].
    pub fn export(&self, entries: &[CacheEntry], dest_dir: impl AsRef<Path>) -> Result<BatchReport> {
        ops::export(entries, dest_dir)
    }

    /// See [`ops::bundle`].
    pub fn bundle(&self, entries: &[CacheEntry], dest_file: impl AsRef<Path>) -> Result<()> {
        ops::bundle(entries, dest_file)
    }

    /// See [`ops::delete`].
    pub fn delete(&self, entries: &[CacheEntry]) -> BatchReport {
        ops::delete(entries)
    }
}
