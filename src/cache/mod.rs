//! Cache Module
//!
//! Memcache-style caching with TTL expiration over pluggable string storage.

mod caches;
mod clock;
mod engine;
mod expiry;
mod keys;


// Re-export public types
pub use caches::Caches;
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use engine::{create_cache, CacheEngine, CacheOptions};
pub use expiry::ExpiryOracle;
pub use keys::{KeyCodec, DEFAULT_CACHE_PREFIX, DEFAULT_EXPIRE_PREFIX};
