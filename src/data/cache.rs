//! Load cache: parse a CSV once, reuse the frame until the file changes.

use crate::config::CsvOptions;
use polars::prelude::DataFrame;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Identifies one parse of one version of a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
    options: CsvOptions,
}

impl CacheKey {
    /// Build a key from the file's current metadata.
    pub fn for_file(path: &Path, options: &CsvOptions) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(Self {
            path,
            len: meta.len(),
            modified: meta.modified().ok(),
            options: options.clone(),
        })
    }

    /// Whether the file still has the size and mtime this key was built from.
    pub fn is_current(&self) -> bool {
        CacheKey::for_file(&self.path, &self.options).is_ok_and(|now| now == *self)
    }
}

/// Entries kept before the least recently used one is evicted.
pub const DEFAULT_CAPACITY: usize = 8;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Memoised CSV frames, bounded to `capacity` entries.
pub struct DataCache {
    frames: HashMap<CacheKey, (DataFrame, u64)>,
    capacity: usize,
    clock: u64,
    hits: usize,
    misses: usize,
}

impl Default for DataCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DataCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Cached frame for `key`, if any. DataFrame clones share column buffers.
    pub fn get(&mut self, key: &CacheKey) -> Option<DataFrame> {
        let now = self.tick();
        match self.frames.get_mut(key) {
            Some((df, last_used)) => {
                *last_used = now;
                self.hits += 1;
                log::debug!("Cache hit for {}", key.path.display());
                Some(df.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: CacheKey, df: DataFrame) {
        // Older versions of the same file are unreachable once it changed.
        self.frames.retain(|k, _| k.path != key.path || k.options != key.options);

        while self.frames.len() >= self.capacity {
            let Some(oldest) = self
                .frames
                .iter()
                .min_by_key(|(_, (_, last_used))| *last_used)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            log::debug!("Evicting {} from cache", oldest.path.display());
            self.frames.remove(&oldest);
        }

        let now = self.tick();
        self.frames.insert(key, (df, now));
    }

    pub fn clear(&mut self) {
        log::info!("Clearing {} cached frame(s)", self.frames.len());
        self.frames.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.frames.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "data_explorer_cache_{}_{}.csv",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn frame() -> DataFrame {
        DataFrame::new(vec![Column::new("a".into(), vec![1i64, 2, 3])]).unwrap()
    }

    #[test]
    fn hit_after_insert() {
        let path = write_csv("hit", "a\n1\n2\n3\n");
        let options = CsvOptions::default();
        let mut cache = DataCache::default();

        let key = CacheKey::for_file(&path, &options).unwrap();
        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), frame());

        let again = CacheKey::for_file(&path, &options).unwrap();
        assert_eq!(cache.get(&again).unwrap().height(), 3);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn changed_file_misses_and_replaces() {
        let path = write_csv("changed", "a\n1\n");
        let options = CsvOptions::default();
        let mut cache = DataCache::default();
        cache.insert(CacheKey::for_file(&path, &options).unwrap(), frame());

        std::fs::write(&path, "a\n1\n2\n3\n4\n").unwrap();
        let key = CacheKey::for_file(&path, &options).unwrap();
        assert!(cache.get(&key).is_none());

        cache.insert(key, frame());
        assert_eq!(cache.stats().entries, 1);
    }

    #[test]
    fn options_are_part_of_key() {
        let path = write_csv("options", "a;b\n1;2\n");
        let mut cache = DataCache::default();
        cache.insert(
            CacheKey::for_file(&path, &CsvOptions::default()).unwrap(),
            frame(),
        );

        let semicolon = CsvOptions {
            separator: ';',
            ..Default::default()
        };
        let key = CacheKey::for_file(&path, &semicolon).unwrap();
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn key_goes_stale_when_file_is_rewritten() {
        let path = write_csv("stale", "a\n1\n");
        let key = CacheKey::for_file(&path, &CsvOptions::default()).unwrap();
        assert!(key.is_current());

        std::fs::write(&path, "a\n1\n2\n3\n").unwrap();
        assert!(!key.is_current());
    }

    #[test]
    fn evicts_least_recently_used_at_capacity() {
        let options = CsvOptions::default();
        let keys: Vec<CacheKey> = ["lru_a", "lru_b", "lru_c"]
            .iter()
            .map(|name| CacheKey::for_file(&write_csv(name, "a\n1\n"), &options).unwrap())
            .collect();

        let mut cache = DataCache::with_capacity(2);
        cache.insert(keys[0].clone(), frame());
        cache.insert(keys[1].clone(), frame());
        // Touch the first entry so the second becomes the oldest.
        assert!(cache.get(&keys[0]).is_some());
        cache.insert(keys[2].clone(), frame());

        assert_eq!(cache.stats().entries, 2);
        assert!(cache.get(&keys[0]).is_some());
        assert!(cache.get(&keys[1]).is_none());
        assert!(cache.get(&keys[2]).is_some());
    }

    #[test]
    fn clear_empties() {
        let path = write_csv("clear", "a\n1\n");
        let mut cache = DataCache::default();
        cache.insert(
            CacheKey::for_file(&path, &CsvOptions::default()).unwrap(),
            frame(),
        );
        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
