//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storage Error Enum ==
/// Failures raised by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Writing the value would push the backend past its capacity ceiling
    #[error("Quota of {quota} bytes exceeded while writing '{key}'")]
    QuotaExceeded { key: String, quota: usize },

    /// The durable store could not be read or written
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The durable store file does not hold a JSON object of strings
    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Value could not be serialized to JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The bound storage backend rejected the operation
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Cache options are unusable (e.g. clashing prefixes)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A cache operation moved off the async runtime panicked or was cancelled
    #[error("Cache task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) | CacheError::Serialization(_) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::Storage(StorageError::QuotaExceeded { .. }) => {
                StatusCode::INSUFFICIENT_STORAGE
            }
            CacheError::Storage(_) | CacheError::InvalidConfig(_) | CacheError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Result type returned by storage backends.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
