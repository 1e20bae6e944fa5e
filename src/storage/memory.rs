//! Session-scoped storage held in process memory.

use parking_lot::RwLock;

use super::slots::Slots;
use super::{probe, StorageBackend, DEFAULT_QUOTA_BYTES};
use crate::error::StorageResult;

// == Memory Storage ==
/// In-memory backend whose contents live exactly as long as the value.
#[derive(Debug)]
pub struct MemoryStorage {
    slots: RwLock<Slots>,
    enabled: bool,
}

impl MemoryStorage {
    /// Creates an empty backend with the default quota.
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Creates an empty backend that refuses to grow past `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        let mut storage = Self {
            slots: RwLock::new(Slots::new(quota)),
            enabled: false,
        };
        storage.enabled = probe(&storage);
        storage
    }

    /// Creates a backend that reports itself unavailable, mirroring an
    /// environment where the substrate cannot be used.
    pub fn disabled() -> Self {
        Self {
            slots: RwLock::new(Slots::new(0)),
            enabled: false,
        }
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.slots.read().used_bytes()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.write().insert(key, value).map(|_| ())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.slots.read().get(key).cloned()
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.slots.write().remove(key);
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
        for key in keys {
            slots.remove(key);
        }
        Ok(())
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}
