//! Durable storage persisted to a JSON file.
//!
//! The whole key space is kept in memory and rewritten to disk after every
//! mutation (once per batch for bulk removals): the map is serialized to a
//! sibling temp file which is then renamed over the store file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::slots::Slots;
use super::{probe, StorageBackend};
use crate::error::{StorageError, StorageResult};

// == File Storage ==
/// Durable backend backed by a single JSON object file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    slots: RwLock<Slots>,
    enabled: bool,
}

impl FileStorage {
    // == Constructor ==
    /// Opens the store at `path`, creating it if missing.
    ///
    /// Never fails: a store that cannot be loaded or written is returned
    /// disabled, and every cache bound to it degrades to no-ops. A store
    /// loaded full up to its quota stays enabled so it can be drained.
    pub fn open(path: impl Into<PathBuf>, quota: usize) -> Self {
        let path = path.into();

        let (entries, loaded) = match load(&path) {
            Ok(entries) => (entries, true),
            Err(err) => {
                warn!("Durable store {} is unusable: {}", path.display(), err);
                (BTreeMap::new(), false)
            }
        };

        let mut storage = Self {
            path,
            slots: RwLock::new(Slots::from_map(entries, quota)),
            enabled: false,
        };

        // Never probe over a file we failed to read, it would be clobbered
        let usable = loaded && storage.rewrite() && probe(&storage);
        storage.enabled = usable;
        if loaded && !usable {
            warn!(
                "Durable store {} failed the availability probe",
                storage.path.display()
            );
        }

        debug!(
            "Opened durable store {} (enabled={}, keys={})",
            storage.path.display(),
            storage.enabled,
            storage.len()
        );
        storage
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the loaded map back unchanged, which checks the store is
    /// writable without needing quota headroom.
    fn rewrite(&self) -> bool {
        let slots = self.slots.read();
        match self.persist(&slots) {
            Ok(()) => true,
            Err(err) => {
                warn!("Durable store {} is not writable: {}", self.path.display(), err);
                false
            }
        }
    }

    fn persist(&self, slots: &Slots) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec(slots.entries()).map_err(StorageError::Corrupt)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Reads the store file; a missing file is an empty store.
fn load(path: &Path) -> StorageResult<BTreeMap<String, String>> {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(StorageError::Corrupt),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(err.into()),
    }
}

impl StorageBackend for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self.slots.write();
        let previous = slots.insert(key, value)?;

        if let Err(err) = self.persist(&slots) {
            slots.restore(key, previous);
            return Err(err);
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.slots.read().get(key).cloned()
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut slots = self.slots.write();
        let Some(previous) = slots.remove(key) else {
            return Ok(());
        };

        if let Err(err) = self.persist(&slots) {
            slots.restore(key, Some(previous));
            return Err(err);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.read().len()
    }

    fn key(&self, index: usize) -> Option<String> {
        self.slots.read().key_at(index).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.slots.read().keys()
    }

    fn remove_many(&self, keys: &[String]) -> StorageResult<()> {
        let mut slots = self.slots.write();
        let removed: Vec<(&String, String)> = keys
            .iter()
            .filter_map(|key| slots.remove(key).map(|previous| (key, previous)))
            .collect();

        if removed.is_empty() {
            return Ok(());
        }

        if let Err(err) = self.persist(&slots) {
            for (key, previous) in removed {
                slots.restore(key, Some(previous));
            }
            return Err(err);
        }
        Ok(())
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DEFAULT_QUOTA_BYTES;

    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let storage = FileStorage::open(&path, DEFAULT_QUOTA_BYTES);
            assert!(storage.enabled());
            storage.set("a", "1").unwrap();
            storage.set("b", "2").unwrap();
            storage.remove("a").unwrap();
        }

        let reopened = FileStorage::open(&path, DEFAULT_QUOTA_BYTES);
        assert!(reopened.enabled());
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get("b").as_deref(), Some("2"));
        assert!(reopened.get("a").is_none());
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");

        let storage = FileStorage::open(&path, DEFAULT_QUOTA_BYTES);
        assert!(storage.enabled());
        storage.set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_storage_corrupt_file_is_disabled_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileStorage::open(&path, DEFAULT_QUOTA_BYTES);
        assert!(!storage.enabled());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_file_storage_quota_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = FileStorage::open(&path, 64);
        storage.set("small", "1").unwrap();

        let result = storage.set("large", &"x".repeat(128));
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));

        let reopened = FileStorage::open(&path, 64);
        assert!(reopened.get("large").is_none());
        assert_eq!(reopened.get("small").as_deref(), Some("1"));
    }

    #[test]
    fn test_file_storage_full_store_reopens_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = FileStorage::open(&path, 200);
        let mut filled = 0;
        while storage.set(&format!("key{:02}", filled), &"v".repeat(20)).is_ok() {
            filled += 1;
        }
        assert!(filled > 0);
        drop(storage);

        let reopened = FileStorage::open(&path, 200);
        assert!(reopened.enabled());
        assert_eq!(reopened.len(), filled);
        assert_eq!(reopened.get("key00"), Some("v".repeat(20)));

        reopened.remove_many(&reopened.keys()).unwrap();
        assert!(reopened.is_empty());
        assert!(FileStorage::open(&path, 200).is_empty());
    }

    #[test]
    fn test_file_storage_remove_many_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = FileStorage::open(&path, DEFAULT_QUOTA_BYTES);
        for key in ["a", "b", "c"] {
            storage.set(key, "1").unwrap();
        }
        storage
            .remove_many(&["a".to_string(), "c".to_string(), "gone".to_string()])
            .unwrap();

        assert_eq!(storage.keys(), vec!["b"]);
        let on_disk: BTreeMap<String, String> =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_file_storage_file_is_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = FileStorage::open(&path, DEFAULT_QUOTA_BYTES);
        storage.set("key", "\"value\"").unwrap();

        let on_disk: BTreeMap<String, String> =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk.get("key").map(String::as_str), Some("\"value\""));
    }
}
