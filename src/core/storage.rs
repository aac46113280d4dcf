//! Durable key-value storage for favorites and notes.
//!
//! # Public API
//! - [`KeyValueStore`]: string key to string value store
//! - [`FileStore`]: JSON file backend, one object holding every key
//! - [`MemoryStore`]: process-local backend, used in tests and as the
//!   fallback when the file backend is unavailable
//!
//! # Durability
//! Every write re-reads the file, applies the change, and replaces the file
//! atomically (temp file + rename). Concurrent writers from the same session
//! resolve as last-writer-wins.

use crate::core::dirs::get_data_directory;
use crate::core::error::{ExplorerError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const STORE_FILE: &str = "store.json";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(get_data_directory()?.join(STORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            log::error!("Failed to read store '{}': {}", self.path.display(), e);
            ExplorerError::storage_unavailable(&self.path, e)
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            log::error!("Failed to parse store '{}': {}", self.path.display(), e);
            ExplorerError::storage_corrupt(&self.path, e)
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ExplorerError::storage_unavailable(parent, e))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");

        fs::write(&tmp_path, json).map_err(|e| {
            log::error!("Failed to write store '{}': {}", tmp_path.display(), e);
            ExplorerError::storage_unavailable(&tmp_path, e)
        })?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| ExplorerError::storage_unavailable(&self.path, e))?;

        log::debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_reads_as_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = FileStore::new(temp_dir.path().join(STORE_FILE));

        assert_eq!(store.get("favorites")?, None);
        Ok(())
    }

    #[test]
    fn test_file_store_persists_across_instances() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join(STORE_FILE);

        let mut store = FileStore::new(&path);
        store.set("favorites", "[1,2]")?;
        store.set("note-1", "hello")?;

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("favorites")?.as_deref(), Some("[1,2]"));
        assert_eq!(reopened.get("note-1")?.as_deref(), Some("hello"));
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_file_store_remove() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut store = FileStore::new(temp_dir.path().join(STORE_FILE));

        store.set("note-7", "text")?;
        store.remove("note-7")?;
        store.remove("never-set")?;

        assert_eq!(store.get("note-7")?, None);
        Ok(())
    }

    #[test]
    fn test_file_store_corrupt_file_is_reported() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(STORE_FILE);
        fs::write(&path, "{ not json")?;

        let store = FileStore::new(&path);
        match store.get("favorites") {
            Err(ExplorerError::StorageCorrupt { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected StorageCorrupt, got: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_memory_store_round_trip() -> Result<()> {
        let mut store = MemoryStore::new();
        store.set("k", "v")?;
        assert_eq!(store.get("k")?.as_deref(), Some("v"));
        store.remove("k")?;
        assert_eq!(store.get("k")?, None);
        Ok(())
    }
}
