//! Quota-bounded ordered key space shared by the bundled backends.

use std::collections::BTreeMap;

use crate::error::{StorageError, StorageResult};

/// Ordered key/value map that tracks its size against a byte quota.
///
/// Size is the sum of key and value byte lengths. Keys enumerate in
/// lexicographic order.
#[derive(Debug, Clone)]
pub(crate) struct Slots {
    entries: BTreeMap<String, String>,
    used_bytes: usize,
    quota: usize,
}

impl Slots {
    pub fn new(quota: usize) -> Self {
        Self::from_map(BTreeMap::new(), quota)
    }

    /// Wraps an existing map. A map already larger than `quota` is accepted;
    /// only further growth is refused.
    pub fn from_map(entries: BTreeMap<String, String>, quota: usize) -> Self {
        let used_bytes = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
        Self {
            entries,
            used_bytes,
            quota,
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: &str, value: &str) -> StorageResult<Option<String>> {
        let old_size = self
            .entries
            .get(key)
            .map(|old| key.len() + old.len())
            .unwrap_or(0);
        let new_used = self.used_bytes - old_size + key.len() + value.len();

        if new_used > self.quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                quota: self.quota,
            });
        }

        self.used_bytes = new_used;
        Ok(self.entries.insert(key.to_string(), value.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);
        if let Some(value) = &removed {
            self.used_bytes -= key.len() + value.len();
        }
        removed
    }

    /// Puts `key` back to `previous` after a failed write, bypassing the
    /// quota.
    pub fn restore(&mut self, key: &str, previous: Option<String>) {
        self.remove(key);
        if let Some(value) = previous {
            self.used_bytes += key.len() + value.len();
            self.entries.insert(key.to_string(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn key_at(&self, index: usize) -> Option<&String> {
        self.entries.keys().nth(index)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }
}
