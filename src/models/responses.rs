//! Response DTOs for the cache HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

/// Response body for the GET operation (GET /:store/get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the bulk GET operation; misses are `null`
#[derive(Debug, Clone, Serialize)]
pub struct GetManyResponse {
    pub values: Vec<Value>,
}

impl GetManyResponse {
    pub fn new(values: Vec<Option<Value>>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|value| value.unwrap_or(Value::Null))
                .collect(),
        }
    }
}

/// Response body for the SET operation (PUT /:store/set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /:store/del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for bulk writes, removals and flush
#[derive(Debug, Clone, Serialize)]
pub struct BulkResponse {
    pub message: String,
    /// Number of keys the request named
    pub count: usize,
}

impl BulkResponse {
    pub fn new(action: &str, count: usize) -> Self {
        Self {
            message: format!("{} {} keys", action, count),
            count,
        }
    }
}

/// Response body for incr/decr; `value` is null when the cache is disabled
#[derive(Debug, Clone, Serialize)]
pub struct CounterResponse {
    pub key: String,
    pub value: Option<i64>,
}

impl CounterResponse {
    pub fn new(key: impl Into<String>, value: Option<i64>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for GET /:store/length
#[derive(Debug, Clone, Serialize)]
pub struct LengthResponse {
    pub length: usize,
}

/// Response body for POST /:store/cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    /// Number of expired entries removed
    pub removed: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Whether the durable backend is usable
    pub local_enabled: bool,
    /// Whether the session backend is usable
    pub session_enabled: bool,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(local_enabled: bool, session_enabled: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            local_enabled,
            session_enabled,
        }
    }
}
