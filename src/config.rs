//! Configuration Module
//!
//! Handles loading and managing cache and server configuration from
//! environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_CACHE_PREFIX, DEFAULT_EXPIRE_PREFIX};
use crate::storage::DEFAULT_QUOTA_BYTES;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// File backing the durable (local) cache
    pub data_path: PathBuf,
    /// Capacity ceiling of each storage backend, in bytes
    pub quota_bytes: usize,
    /// Prefix of value slots
    pub cache_prefix: String,
    /// Prefix of expiry slots
    pub expire_prefix: String,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LOCACHE_DATA_PATH` - Durable store file (default: locache.json)
    /// - `LOCACHE_QUOTA_BYTES` - Per-backend capacity (default: 5 MiB)
    /// - `LOCACHE_CACHE_PREFIX` - Value slot prefix (default: ___locache___)
    /// - `LOCACHE_EXPIRE_PREFIX` - Expiry slot prefix (default: ___locacheExpire___)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: env::var("LOCACHE_DATA_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            quota_bytes: env::var("LOCACHE_QUOTA_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.quota_bytes),
            cache_prefix: env::var("LOCACHE_CACHE_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.cache_prefix),
            expire_prefix: env::var("LOCACHE_EXPIRE_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.expire_prefix),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("locache.json"),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            expire_prefix: DEFAULT_EXPIRE_PREFIX.to_string(),
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
