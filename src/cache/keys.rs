//! Key Codec Module
//!
//! Maps logical cache keys onto the physical keys written to storage.

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Prefix of physical keys holding serialized values
pub const DEFAULT_CACHE_PREFIX: &str = "___locache___";

/// Prefix of physical keys holding expiry timestamps
pub const DEFAULT_EXPIRE_PREFIX: &str = "___locacheExpire___";

// == Key Codec ==
/// Pair of prefixes namespacing cache data inside a shared storage backend.
///
/// A logical key `k` lives at `cache_prefix + k` with its expiry timestamp,
/// if any, at `expire_prefix + k`. Nothing is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    cache_prefix: String,
    expire_prefix: String,
}

impl KeyCodec {
    /// Builds a codec, rejecting prefixes that would let the two namespaces
    /// overlap: both must be non-empty and neither may start with the other.
    pub fn new(cache_prefix: impl Into<String>, expire_prefix: impl Into<String>) -> Result<Self> {
        let cache_prefix = cache_prefix.into();
        let expire_prefix = expire_prefix.into();

        if cache_prefix.is_empty() || expire_prefix.is_empty() {
            return Err(CacheError::InvalidConfig(
                "Cache and expire prefixes must be non-empty".to_string(),
            ));
        }
        if cache_prefix.starts_with(&expire_prefix) || expire_prefix.starts_with(&cache_prefix) {
            return Err(CacheError::InvalidConfig(format!(
                "Prefixes '{}' and '{}' overlap",
                cache_prefix, expire_prefix
            )));
        }

        Ok(Self {
            cache_prefix,
            expire_prefix,
        })
    }

    pub fn cache_prefix(&self) -> &str {
        &self.cache_prefix
    }

    pub fn expire_prefix(&self) -> &str {
        &self.expire_prefix
    }

    /// Physical key of the value slot for `key`.
    pub fn value_key(&self, key: &str) -> String {
        format!("{}{}", self.cache_prefix, key)
    }

    /// Physical key of the expiry slot for `key`.
    pub fn expiry_key(&self, key: &str) -> String {
        format!("{}{}", self.expire_prefix, key)
    }

    /// Recovers the logical key from a value slot key.
    pub fn logical_key<'a>(&self, physical: &'a str) -> Option<&'a str> {
        physical.strip_prefix(self.cache_prefix.as_str())
    }

    pub fn is_value_key(&self, physical: &str) -> bool {
        physical.starts_with(&self.cache_prefix)
    }

    pub fn is_expiry_key(&self, physical: &str) -> bool {
        physical.starts_with(&self.expire_prefix)
    }
}

impl Default for KeyCodec {
    fn default() -> Self {
        Self {
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            expire_prefix: DEFAULT_EXPIRE_PREFIX.to_string(),
        }
    }
}
