use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use super::loader::{self, ParseError};
use super::model::Table;

// ---------------------------------------------------------------------------
// Session-scoped loader cache
// ---------------------------------------------------------------------------

/// Memoizes parsed tables for the lifetime of the session, keyed by the hash
/// of the file's bytes. Re-opening a file with unchanged content returns the
/// same `Arc<Table>` without re-parsing; changed content under the same path
/// hashes differently and is parsed fresh.
#[derive(Default)]
pub struct LoaderCache {
    entries: HashMap<u64, Arc<Table>>,
    parses: usize,
}

impl LoaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV file through the cache.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Table>, ParseError> {
        let bytes = std::fs::read(path)?;
        self.load_bytes(&bytes)
    }

    /// Load CSV content through the cache.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Arc<Table>, ParseError> {
        let key = content_key(bytes);
        if let Some(table) = self.entries.get(&key) {
            log::debug!("loader cache hit (key {key:#x})");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(loader::parse_csv(bytes)?);
        self.parses += 1;
        self.entries.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Drop all memoized tables.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of parses performed so far (cache misses).
    pub fn parse_count(&self) -> usize {
        self.parses
    }
}

fn content_key(bytes: &[u8]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b"a,b\n1,2\n3,4\n";

    #[test]
    fn repeated_load_skips_parsing() {
        let mut cache = LoaderCache::new();
        let first = cache.load_bytes(CSV).unwrap();
        let second = cache.load_bytes(CSV).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.parse_count(), 1);
    }

    #[test]
    fn changed_content_parses_again() {
        let mut cache = LoaderCache::new();
        let first = cache.load_bytes(CSV).unwrap();
        let second = cache.load_bytes(b"a,b\n5,6\n").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.parse_count(), 2);
    }

    #[test]
    fn clear_forces_a_reparse() {
        let mut cache = LoaderCache::new();
        cache.load_bytes(CSV).unwrap();
        cache.clear();
        cache.load_bytes(CSV).unwrap();
        assert_eq!(cache.parse_count(), 2);
    }

    #[test]
    fn parse_failures_are_not_cached() {
        let mut cache = LoaderCache::new();
        assert!(cache.load_bytes(b"a,b\n1\n").is_err());
        assert_eq!(cache.parse_count(), 0);
    }
}
