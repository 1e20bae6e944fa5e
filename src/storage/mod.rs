//! Storage Module
//!
//! The flat string key/value substrate the cache is layered on. Backends only
//! know about strings; namespacing and expiry live in the cache engine.

mod file;
mod memory;
mod slots;

use std::fmt;

use crate::error::{StorageError, StorageResult};

pub use file::FileStorage;
pub use memory::MemoryStorage;

// == Public Constants ==
/// Default capacity ceiling of a backend, in bytes of keys plus values
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Key written and removed again when probing whether a backend works
pub(crate) const PROBE_KEY: &str = "___locache___";

// == Storage Backend ==
/// Synchronous string key/value substrate.
///
/// Implementations use interior mutability so a single backend can be shared
/// between engines through an `Arc`. Each call is atomic on its own; nothing
/// is atomic across calls.
pub trait StorageBackend: Send + Sync + fmt::Debug {
    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Deletes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Number of keys stored, including keys not written by the cache.
    fn len(&self) -> usize;

    /// Returns the key at `index` in enumeration order, or `None` when the
    /// index is outside `0..len()`.
    ///
    /// Enumeration order is backend-defined and indices shift when keys are
    /// removed.
    fn key(&self, index: usize) -> Option<String>;

    /// Every key in enumeration order, taken in one pass.
    fn keys(&self) -> Vec<String> {
        (0..self.len()).filter_map(|index| self.key(index)).collect()
    }

    /// Deletes each of `keys`. Backends that pay per write may apply the
    /// whole batch at once.
    fn remove_many(&self, keys: &[String]) -> StorageResult<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Whether the backend is usable. Fixed for the lifetime of the backend.
    fn enabled(&self) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs the set/get/remove round trip a backend must survive to be usable.
///
/// A backend already holding data that has no room left for the probe key is
/// still usable: its entries can be read and removed.
pub(crate) fn probe(backend: &dyn StorageBackend) -> bool {
    match backend.set(PROBE_KEY, PROBE_KEY) {
        Ok(()) => {
            backend.get(PROBE_KEY).as_deref() == Some(PROBE_KEY)
                && backend.remove(PROBE_KEY).is_ok()
        }
        Err(StorageError::QuotaExceeded { .. }) => !backend.is_empty(),
        Err(_) => false,
    }
}
