use crate::entry::CacheEntry;
use std::path::Path;

/// Sort keys for the inventory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Display name, case-insensitive.
    Name,
    /// Declared version, case-insensitive; unknown versions sort first.
    Version,
    /// Numeric byte count — never the rendered size string.
    Size,
}

/// The in-memory index built by the most recent rescan: one entry per
/// discovered archive, unique by path, in scan order until explicitly
/// sorted.
///
/// Filtering and sorting are pure in-memory operations; nothing here
/// touches the disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<CacheEntry>,
}

impl Inventory {
    pub fn new(entries: Vec<CacheEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CacheEntry> {
        self.entries.iter()
    }

    /// Looks up an entry by its scan path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&CacheEntry> {
        let path = path.as_ref();
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Combined size of the indexed archives only. The whole-directory
    /// total lives in [`ScanOutcome`](crate::ScanOutcome), which also
    /// counts non-archive files.
    pub fn entries_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }

    /// Case-insensitive substring filter over display name, declared
    /// version and raw file name. The needle is trimmed first; an empty
    /// needle returns the inventory unchanged.
    #[must_use]
    pub fn filter(&self, text: &str) -> Inventory {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        let entries = self
            .entries
            .iter()
            .filter(|entry| {
                entry.display_name.to_lowercase().contains(&needle)
                    || entry.version.as_ref().is_some_and(|v| v.as_str().to_lowercase().contains(&needle))
                    || entry.file_name().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Inventory::new(entries)
    }

    /// Reorders the inventory in place. The sort is stable, so entries
    /// that compare equal keep their prior (scan) order.
    pub fn sort_by(&mut self, field: SortField) {
        match field {
            SortField::Name => self.entries.sort_by_key(|entry| entry.display_name.to_lowercase()),
            SortField::Version => self
                .entries
                .sort_by_key(|entry| entry.version.as_ref().map(|v| v.as_str().to_lowercase()).unwrap_or_default()),
            SortField::Size => self.entries.sort_by_key(|entry| entry.size),
        }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a CacheEntry;
    type IntoIter = std::slice::Iter<'a, CacheEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modcache_extract::ModVersion;
    use std::path::PathBuf;
    use time::OffsetDateTime;

    fn entry(name: &str, version: Option<&str>, size: u64) -> CacheEntry {
        CacheEntry {
            path: PathBuf::from(format!("{name}.jar")),
            display_name: name.to_string(),
            size,
            modified: OffsetDateTime::UNIX_EPOCH,
            version: version.map(|v| ModVersion::new(v).unwrap()),
        }
    }

    fn names(inventory: &Inventory) -> Vec<&str> {
        inventory.iter().map(|e| e.display_name.as_str()).collect()
    }

    #[test]
    fn test_filter_matches_version() {
        let inventory = Inventory::new(vec![entry("A", Some("1.2.3"), 10), entry("B", None, 20)]);
        assert_eq!(names(&inventory.filter("1.2")), vec!["A"]);
    }

    #[test]
    fn test_filter_matches_name_and_file_name() {
        let inventory = Inventory::new(vec![entry("OreTweaks", Some("2.0"), 10), entry("MapTools", None, 20)]);
        assert_eq!(names(&inventory.filter("oretw")), vec!["OreTweaks"]);
        // The raw file name (including extension) is searchable too.
        assert_eq!(names(&inventory.filter(".JAR")).len(), 2);
    }

    #[test]
    fn test_filter_empty_needle_returns_everything() {
        let inventory = Inventory::new(vec![entry("A", None, 1), entry("B", None, 2)]);
        assert_eq!(inventory.filter(""), inventory);
        assert_eq!(inventory.filter("   "), inventory);
    }

    #[test]
    fn test_filter_trims_needle() {
        let inventory = Inventory::new(vec![entry("A", Some("1.2.3"), 10), entry("B", None, 20)]);
        assert_eq!(names(&inventory.filter("  1.2  ")), vec!["A"]);
    }

    #[test]
    fn test_sort_by_size_is_numeric() {
        // Formatted strings would order these "1.00 KB" < "2.00 KB" <
        // "512.00 B" lexicographically; the numeric sort must not.
        let mut inventory =
            Inventory::new(vec![entry("big", None, 2048), entry("small", None, 512), entry("huge", None, 1_048_576)]);
        inventory.sort_by(SortField::Size);
        assert_eq!(names(&inventory), vec!["small", "big", "huge"]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut inventory =
            Inventory::new(vec![entry("beta", None, 1), entry("Alpha", None, 1), entry("GAMMA", None, 1)]);
        inventory.sort_by(SortField::Name);
        assert_eq!(names(&inventory), vec!["Alpha", "beta", "GAMMA"]);
    }

    #[test]
    fn test_sort_by_version_unknown_first() {
        let mut inventory = Inventory::new(vec![
            entry("c", Some("2.0"), 1),
            entry("a", None, 1),
            entry("b", Some("1.0"), 1),
        ]);
        inventory.sort_by(SortField::Version);
        assert_eq!(names(&inventory), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut inventory =
            Inventory::new(vec![entry("first", None, 100), entry("second", None, 100), entry("tiny", None, 1)]);
        inventory.sort_by(SortField::Size);
        assert_eq!(names(&inventory), vec!["tiny", "first", "second"]);
    }

    #[test]
    fn test_get_and_sizes() {
        let inventory = Inventory::new(vec![entry("A", None, 10), entry("B", None, 32)]);
        assert_eq!(inventory.get("B.jar").unwrap().size, 32);
        assert!(inventory.get("missing.jar").is_none());
        assert_eq!(inventory.entries_size(), 42);
        assert_eq!(inventory.len(), 2);
        assert!(!inventory.is_empty());
    }
}
