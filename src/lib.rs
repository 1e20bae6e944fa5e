//! locache - A memcache-style cache over plain string storage
//!
//! Provides set-with-TTL, get, counters, bulk operations, flush and lazy
//! expiry on top of any backend that can store string keys and values.
//! Ships a durable file-backed store, an in-memory session store, and an
//! HTTP server exposing both.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::{create_cache, CacheEngine, CacheOptions, Caches};
pub use config::Config;
pub use error::{CacheError, StorageError};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use tasks::spawn_cleanup_task;
