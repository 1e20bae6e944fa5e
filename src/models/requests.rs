//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming HTTP request bodies and path segments.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Which of the two stock caches a request addresses (`/:store/...`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// The durable cache
    Local,
    /// The in-memory cache
    Session,
}

/// Request body for the SET operation (PUT /:store/set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in seconds (no expiry if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Request body for the bulk SET operation (PUT /:store/set_many)
#[derive(Debug, Clone, Deserialize)]
pub struct SetManyRequest {
    /// Keys and values to store
    pub entries: Map<String, Value>,
    /// Optional TTL in seconds applied to every entry
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetManyRequest {
    pub fn validate(&self) -> Option<String> {
        if self.entries.keys().any(String::is_empty) {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Request body for bulk lookups and removals
#[derive(Debug, Clone, Deserialize)]
pub struct KeysRequest {
    pub keys: Vec<String>,
}
