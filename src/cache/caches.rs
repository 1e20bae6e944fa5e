//! The two stock cache instances: durable and session-scoped.

use std::sync::Arc;

use tracing::info;

use super::engine::{create_cache, CacheEngine, CacheOptions};
use crate::config::Config;
use crate::error::Result;
use crate::storage::{FileStorage, MemoryStorage, StorageBackend};

// == Caches ==
/// A durable cache and a session cache side by side.
///
/// Both share the same logic and prefixes; they stay apart because they are
/// bound to different backends.
#[derive(Debug, Clone)]
pub struct Caches {
    /// Cache persisted across restarts; the default one
    pub local: CacheEngine,
    /// Cache that lives only as long as the process
    pub session: CacheEngine,
}

impl Caches {
    pub fn new(local: CacheEngine, session: CacheEngine) -> Self {
        Self { local, session }
    }

    /// Builds the local cache over a [`FileStorage`] at `config.data_path`
    /// and the session cache over a fresh [`MemoryStorage`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let durable = Arc::new(FileStorage::open(&config.data_path, config.quota_bytes));
        let path = durable.path().display().to_string();

        let memory = Arc::new(MemoryStorage::with_quota(config.quota_bytes));

        let local = create_cache(options(config, durable))?;
        let session = create_cache(options(config, memory))?;

        info!(
            "Local cache at {} (enabled={}), session cache in memory (enabled={}), prefixes {:?}/{:?}",
            path,
            local.enabled(),
            session.enabled(),
            local.keys().cache_prefix(),
            local.keys().expire_prefix()
        );

        Ok(Self { local, session })
    }

    /// Both caches over independent in-memory backends.
    pub fn in_memory() -> Self {
        Self {
            local: CacheEngine::with_storage(Arc::new(MemoryStorage::new())),
            session: CacheEngine::with_storage(Arc::new(MemoryStorage::new())),
        }
    }
}

fn options(config: &Config, storage: Arc<dyn StorageBackend>) -> CacheOptions {
    CacheOptions::new(storage)
        .with_cache_prefix(config.cache_prefix.clone())
        .with_expire_prefix(config.expire_prefix.clone())
}
