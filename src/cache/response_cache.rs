//! Flat JSON response cache

use super::Fingerprint;
use crate::{ChurrosGraphsError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Path to the JSON cache file
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("querycache.json"),
        }
    }
}

/// Fingerprint → response mapping, persisted on every write
///
/// The whole mapping is rewritten on each `put`, through a temporary file
/// renamed over the cache file. Entries are never evicted.
#[derive(Debug)]
pub struct ResponseCache {
    entries: BTreeMap<String, Value>,
    config: CacheConfig,
}

impl ResponseCache {
    /// Open the cache file, creating it with `{}` if it does not exist
    pub fn new(config: CacheConfig) -> Result<Self> {
        let path = &config.path;

        let entries = if path.exists() {
            tracing::info!(path = %path.display(), "Loading response cache");
            let content = fs::read_to_string(path).map_err(|e| cache_io(path, e))?;
            serde_json::from_str::<BTreeMap<String, Value>>(&content).map_err(|e| {
                ChurrosGraphsError::CacheIo(format!(
                    "{}: not a JSON object of cached responses: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            tracing::info!(path = %path.display(), "Creating empty response cache");
            BTreeMap::new()
        };

        let cache = Self { entries, config };
        if !cache.config.path.exists() {
            cache.persist()?;
        }

        tracing::debug!(entries = cache.entries.len(), "Response cache ready");
        Ok(cache)
    }

    /// Open the cache at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(CacheConfig { path: path.into() })
    }

    /// Cached response for `fingerprint`, if any
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&Value> {
        self.entries.get(fingerprint.as_str())
    }

    /// Store a response and persist the whole mapping
    pub fn put(&mut self, fingerprint: Fingerprint, response: Value) -> Result<()> {
        self.entries.insert(fingerprint.as_str().to_string(), response);
        self.persist()
    }

    /// Remove every entry and persist the empty mapping
    pub fn clear(&mut self) -> Result<()> {
        tracing::info!(path = %self.config.path.display(), "Clearing response cache");
        self.entries.clear();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored fingerprints, in key order
    pub fn fingerprints(&self) -> impl Iterator<Item = Fingerprint> + '_ {
        self.entries.keys().map(|k| Fingerprint::from_raw(k.clone()))
    }

    /// Get the cache file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn persist(&self) -> Result<()> {
        let path = &self.config.path;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| cache_io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| cache_io(dir, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, &self.entries)
                .map_err(|e| ChurrosGraphsError::CacheIo(format!("{}: {}", path.display(), e)))?;
            writer.flush().map_err(|e| cache_io(path, e))?;
        }
        tmp.persist(path).map_err(|e| cache_io(path, e.error))?;

        tracing::debug!(path = %path.display(), entries = self.entries.len(), "Response cache written");
        Ok(())
    }
}

fn cache_io(path: &Path, err: std::io::Error) -> ChurrosGraphsError {
    ChurrosGraphsError::CacheIo(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn fp(query: &str) -> Fingerprint {
        Fingerprint::new(query, &json!({}))
    }

    #[test]
    fn test_cache_creation_writes_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("querycache.json");

        let cache = ResponseCache::open(&path).unwrap();
        assert!(cache.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_put_then_get() {
        let dir = TempDir::new().unwrap();
        let mut cache = ResponseCache::open(dir.path().join("c.json")).unwrap();

        let response = json!({"data": {"groups": [{"name": "A"}]}});
        cache.put(fp("query A {}"), response.clone()).unwrap();

        assert_eq!(cache.get(&fp("query A {}")), Some(&response));
        assert_eq!(cache.get(&fp("query B {}")), None);
    }

    #[test]
    fn test_put_is_write_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.json");

        let mut cache = ResponseCache::open(&path).unwrap();
        cache.put(fp("query A {}"), json!({"data": 1})).unwrap();

        let reopened = ResponseCache::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get(&fp("query A {}")), Some(&json!({"data": 1})));

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({"queryA{}{}": {"data": 1}}));
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        ResponseCache::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_is_cache_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = ResponseCache::open(&path);
        assert!(matches!(result, Err(ChurrosGraphsError::CacheIo(_))));
        // Left untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("c.json");

        let mut cache = ResponseCache::open(&path).unwrap();
        cache.put(fp("query A {}"), json!(1)).unwrap();
        cache.put(fp("query B {}"), json!(2)).unwrap();
        assert_eq!(cache.fingerprints().count(), 2);

        cache.clear().unwrap();
        assert!(cache.is_empty());
        assert!(ResponseCache::open(&path).unwrap().is_empty());
    }
}
