//! Cache Engine Module
//!
//! Memcache-style operations layered over a [`StorageBackend`]. Values are
//! stored as JSON text under a namespaced key, and an optional expiry
//! timestamp lives in a second slot that is checked lazily on read.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::clock::Clock;
use super::expiry::{parse_int, ExpiryOracle};
use super::keys::{KeyCodec, DEFAULT_CACHE_PREFIX, DEFAULT_EXPIRE_PREFIX};
use crate::error::Result;
use crate::storage::StorageBackend;

// == Cache Options ==
/// Everything needed to build a [`CacheEngine`]. Unset fields fall back to
/// the default prefixes and the system clock.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Backend the engine reads and writes
    pub storage: Arc<dyn StorageBackend>,
    /// Prefix of value slots
    pub cache_prefix: Option<String>,
    /// Prefix of expiry slots
    pub expire_prefix: Option<String>,
    /// Time source for expiry
    pub clock: Option<Arc<dyn Clock>>,
}

impl CacheOptions {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            cache_prefix: None,
            expire_prefix: None,
            clock: None,
        }
    }

    pub fn with_cache_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cache_prefix = Some(prefix.into());
        self
    }

    pub fn with_expire_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.expire_prefix = Some(prefix.into());
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }
}

/// Builds a new engine from `options`.
///
/// Fails only when the configured prefixes are empty or overlap.
pub fn create_cache(options: CacheOptions) -> Result<CacheEngine> {
    CacheEngine::new(options)
}

// == Cache Engine ==
/// Cache bound to one storage backend.
///
/// Cloning is cheap and clones share the backend. Engines bound to different
/// backends never see each other's entries, whatever their prefixes.
///
/// When the backend reports itself disabled every operation degrades
/// silently: writes do nothing and reads come back empty.
#[derive(Debug, Clone)]
pub struct CacheEngine {
    storage: Arc<dyn StorageBackend>,
    keys: KeyCodec,
    expiry: ExpiryOracle,
}

impl CacheEngine {
    // == Constructors ==
    pub fn new(options: CacheOptions) -> Result<Self> {
        let keys = KeyCodec::new(
            options
                .cache_prefix
                .unwrap_or_else(|| DEFAULT_CACHE_PREFIX.to_string()),
            options
                .expire_prefix
                .unwrap_or_else(|| DEFAULT_EXPIRE_PREFIX.to_string()),
        )?;
        let expiry = options.clock.map(ExpiryOracle::new).unwrap_or_default();

        Ok(Self {
            storage: options.storage,
            keys,
            expiry,
        })
    }

    /// Engine over `storage` with default prefixes and the system clock.
    pub fn with_storage(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            keys: KeyCodec::default(),
            expiry: ExpiryOracle::default(),
        }
    }

    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }

    pub fn keys(&self) -> &KeyCodec {
        &self.keys
    }

    /// Whether the bound backend is usable.
    pub fn enabled(&self) -> bool {
        self.storage.enabled()
    }

    // == Set ==
    /// Stores `value` under `key`, expiring after `ttl_seconds` when given a
    /// non-zero TTL.
    ///
    /// An empty key is ignored. Setting without a TTL leaves any expiry slot
    /// from an earlier `set` in place, so the old deadline still applies;
    /// [`remove`](Self::remove) the key first to make it permanent.
    pub fn set<V>(&self, key: &str, value: &V, ttl_seconds: Option<u64>) -> Result<()>
    where
        V: Serialize + ?Sized,
    {
        if !self.enabled() || key.is_empty() {
            return Ok(());
        }

        let serialized = serde_json::to_string(value)?;

        if let Some(ttl) = ttl_seconds.filter(|ttl| *ttl > 0) {
            let expires_at = self.expiry.expires_at(ttl);
            self.storage
                .set(&self.keys.expiry_key(key), &expires_at.to_string())?;
        }

        self.storage.set(&self.keys.value_key(key), &serialized)?;
        Ok(())
    }

    // == Get ==
    /// Returns the value stored under `key`.
    ///
    /// Expired entries are removed and reported missing. Stored text that is
    /// not valid JSON is treated as a miss, except the empty string which is
    /// returned as-is.
    pub fn get(&self, key: &str) -> Option<Value> {
        if !self.enabled() {
            return None;
        }

        if self.has_expired(key) {
            debug!("Key '{}' expired, removing", key);
            if let Err(err) = self.remove(key) {
                warn!("Failed to remove expired key '{}': {}", key, err);
            }
            return None;
        }

        let raw = self.storage.get(&self.keys.value_key(key))?;
        if raw.is_empty() {
            return Some(Value::String(raw));
        }

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("Ignoring unparsable value for '{}': {}", key, err);
                None
            }
        }
    }

    /// Typed [`get`](Self::get). A value of the wrong shape is a miss.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    // == Has Expired ==
    /// Whether `key` carries an expiry timestamp that is already in the past.
    pub fn has_expired(&self, key: &str) -> bool {
        let raw = self.storage.get(&self.keys.expiry_key(key));
        self.expiry.is_expired(raw.as_deref())
    }

    // == Remove ==
    /// Deletes both slots of `key`. Absent slots are skipped by the backend.
    pub fn remove(&self, key: &str) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }

        self.storage.remove(&self.keys.expiry_key(key))?;
        self.storage.remove(&self.keys.value_key(key))?;
        Ok(())
    }

    // == Counters ==
    /// Adds one to the counter at `key` and returns the new value.
    ///
    /// Missing or non-numeric values count as zero. The write-back carries no
    /// TTL, and the read-modify-write is not atomic against other writers of
    /// the same backend. Returns `None` when the backend is disabled.
    pub fn incr(&self, key: &str) -> Result<Option<i64>> {
        self.step(key, 1)
    }

    /// Subtracts one from the counter at `key`. See [`incr`](Self::incr).
    pub fn decr(&self, key: &str) -> Result<Option<i64>> {
        self.step(key, -1)
    }

    fn step(&self, key: &str, delta: i64) -> Result<Option<i64>> {
        if !self.enabled() {
            return Ok(None);
        }

        let current = self.get(key).as_ref().and_then(counter_value).unwrap_or(0);
        let next = current.saturating_add(delta);
        self.set(key, &next, None)?;
        Ok(Some(next))
    }

    // == Bulk Operations ==
    /// Sets every entry with the same TTL, in iteration order.
    ///
    /// Stops at the first failure; entries before it stay written.
    pub fn set_many<I, K, V>(&self, entries: I, ttl_seconds: Option<u64>) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        if !self.enabled() {
            return Ok(());
        }

        for (key, value) in entries {
            self.set(key.as_ref(), &value, ttl_seconds)?;
        }
        Ok(())
    }

    /// Looks up each key, returning one result per key in the same order.
    pub fn get_many<I, K>(&self, keys: I) -> Vec<Option<Value>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().map(|key| self.get(key.as_ref())).collect()
    }

    pub fn remove_many<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        if !self.enabled() {
            return Ok(());
        }

        for key in keys {
            self.remove(key.as_ref())?;
        }
        Ok(())
    }

    // == Flush ==
    /// Removes every value and expiry slot in this engine's namespace.
    /// Keys outside both prefixes are left alone.
    pub fn flush(&self) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }

        let doomed: Vec<String> = self
            .physical_keys()
            .into_iter()
            .filter(|key| self.keys.is_value_key(key) || self.keys.is_expiry_key(key))
            .collect();

        self.storage.remove_many(&doomed)?;

        debug!("Flush removed {} physical keys", doomed.len());
        Ok(())
    }

    // == Length ==
    /// Number of value slots in this engine's namespace, expired or not.
    pub fn length(&self) -> usize {
        if !self.enabled() {
            return 0;
        }

        self.physical_keys()
            .iter()
            .filter(|key| self.keys.is_value_key(key))
            .count()
    }

    // == Cleanup ==
    /// Removes every expired entry and returns how many were removed.
    pub fn cleanup(&self) -> Result<usize> {
        if !self.enabled() {
            return Ok(0);
        }

        let mut doomed = Vec::new();
        for physical in self.physical_keys() {
            let Some(key) = self.keys.logical_key(&physical) else {
                continue;
            };
            if self.has_expired(key) {
                doomed.push(self.keys.expiry_key(key));
                doomed.push(physical.clone());
            }
        }

        let removed = doomed.len() / 2;
        self.storage.remove_many(&doomed)?;

        debug!("Cleanup removed {} expired entries", removed);
        Ok(removed)
    }

    /// Snapshot of the backend's keys, taken before any of them is removed
    /// so removals cannot shift entries still to be visited. Keys written by
    /// someone else afterwards are missed.
    fn physical_keys(&self) -> Vec<String> {
        self.storage.keys()
    }
}

/// Integer reading of a cached value: integral numbers as-is, other numbers
/// truncated, strings by their leading digits.
fn counter_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::{CacheError, StorageError};
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Fixture {
        cache: CacheEngine,
        storage: Arc<MemoryStorage>,
        clock: Arc<ManualClock>,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache =
            create_cache(CacheOptions::new(storage.clone()).with_clock(clock.clone())).unwrap();
        Fixture {
            cache,
            storage,
            clock,
        }
    }

    fn disabled_cache() -> CacheEngine {
        CacheEngine::with_storage(Arc::new(MemoryStorage::disabled()))
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let f = fixture();
        let value = json!({"name": "locache", "tags": [1, 2.5, null, true]});

        f.cache.set("doc", &value, None).unwrap();
        assert_eq!(f.cache.get("doc"), Some(value));
    }

    #[test]
    fn test_set_writes_namespaced_slots() {
        let f = fixture();
        f.cache.set("user", "bob", Some(60)).unwrap();

        assert_eq!(
            f.storage.get("___locache___user").as_deref(),
            Some("\"bob\"")
        );
        assert_eq!(
            f.storage.get("___locacheExpire___user").as_deref(),
            Some("1060000")
        );
    }

    #[test]
    fn test_set_without_ttl_writes_no_expiry_slot() {
        let f = fixture();
        f.cache.set("k", &1, None).unwrap();
        f.cache.set("z", &1, Some(0)).unwrap();

        assert!(f.storage.get("___locacheExpire___k").is_none());
        assert!(f.storage.get("___locacheExpire___z").is_none());
    }

    #[test]
    fn test_set_empty_key_is_noop() {
        let f = fixture();
        f.cache.set("", "value", Some(10)).unwrap();
        assert!(f.storage.is_empty());
    }

    #[test]
    fn test_set_unserializable_value_fails_without_writing() {
        let f = fixture();
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys are not JSON object keys");

        let result = f.cache.set("bad", &bad, Some(10));
        assert!(matches!(result, Err(CacheError::Serialization(_))));
        assert!(f.storage.is_empty());
    }

    #[test]
    fn test_get_missing_is_none() {
        let f = fixture();
        assert_eq!(f.cache.get("missing"), None);
    }

    #[test]
    fn test_get_unparsable_is_none() {
        let f = fixture();
        f.storage.set("___locache___raw", "{not json").unwrap();
        assert_eq!(f.cache.get("raw"), None);
        // Foreign data is left in place
        assert!(f.storage.get("___locache___raw").is_some());
    }

    #[test]
    fn test_get_empty_string_slot_is_returned_literally() {
        let f = fixture();
        f.storage.set("___locache___blank", "").unwrap();
        assert_eq!(f.cache.get("blank"), Some(json!("")));
    }

    #[test]
    fn test_get_as_typed() {
        let f = fixture();
        f.cache.set("nums", &vec![1, 2, 3], None).unwrap();

        assert_eq!(f.cache.get_as::<Vec<u32>>("nums"), Some(vec![1, 2, 3]));
        assert_eq!(f.cache.get_as::<String>("nums"), None);
    }

    #[test]
    fn test_expired_get_removes_both_slots() {
        let f = fixture();
        f.cache.set("session", "abc", Some(1)).unwrap();
        assert_eq!(f.cache.get("session"), Some(json!("abc")));

        f.clock.advance(Duration::from_millis(1001));

        assert_eq!(f.cache.get("session"), None);
        assert!(f.storage.get("___locache___session").is_none());
        assert!(f.storage.get("___locacheExpire___session").is_none());
    }

    #[test]
    fn test_expiry_boundary_is_still_live() {
        let f = fixture();
        f.cache.set("k", "v", Some(1)).unwrap();

        f.clock.advance(Duration::from_millis(1000));
        assert!(!f.cache.has_expired("k"));
        assert_eq!(f.cache.get("k"), Some(json!("v")));

        f.clock.advance(Duration::from_millis(1));
        assert!(f.cache.has_expired("k"));
    }

    #[test]
    fn test_set_without_ttl_keeps_previous_expiry() {
        let f = fixture();
        f.cache.set("k", "first", Some(5)).unwrap();
        f.cache.set("k", "second", None).unwrap();

        assert_eq!(f.cache.get("k"), Some(json!("second")));
        f.clock.advance(Duration::from_secs(6));
        assert_eq!(f.cache.get("k"), None);
    }

    #[test]
    fn test_set_with_new_ttl_replaces_expiry() {
        let f = fixture();
        f.cache.set("k", "v", Some(5)).unwrap();
        f.cache.set("k", "v", Some(60)).unwrap();

        f.clock.advance(Duration::from_secs(6));
        assert_eq!(f.cache.get("k"), Some(json!("v")));
    }

    #[test]
    fn test_remove_deletes_both_slots() {
        let f = fixture();
        f.cache.set("k", "v", Some(60)).unwrap();
        f.cache.remove("k").unwrap();

        assert_eq!(f.cache.get("k"), None);
        assert!(f.storage.is_empty());

        // Removing an absent key is fine
        f.cache.remove("k").unwrap();
    }

    #[test]
    fn test_incr_from_absent() {
        let f = fixture();
        assert_eq!(f.cache.incr("hits").unwrap(), Some(1));
        assert_eq!(f.cache.incr("hits").unwrap(), Some(2));
        assert_eq!(f.cache.incr("hits").unwrap(), Some(3));
        assert_eq!(f.cache.get("hits"), Some(json!(3)));
    }

    #[test]
    fn test_decr_from_absent() {
        let f = fixture();
        assert_eq!(f.cache.decr("left").unwrap(), Some(-1));
        assert_eq!(f.cache.decr("left").unwrap(), Some(-2));
    }

    #[test]
    fn test_incr_coerces_existing_values() {
        let f = fixture();
        f.cache.set("float", &2.7, None).unwrap();
        f.cache.set("text", "41", None).unwrap();
        f.cache.set("word", "many", None).unwrap();
        f.cache.set("flag", &true, None).unwrap();

        assert_eq!(f.cache.incr("float").unwrap(), Some(3));
        assert_eq!(f.cache.incr("text").unwrap(), Some(42));
        assert_eq!(f.cache.incr("word").unwrap(), Some(1));
        assert_eq!(f.cache.incr("flag").unwrap(), Some(1));
    }

    #[test]
    fn test_incr_leaves_expiry_slot_alone() {
        let f = fixture();
        f.cache.set("counter", &10, Some(5)).unwrap();
        assert_eq!(f.cache.incr("counter").unwrap(), Some(11));
        assert!(f.storage.get("___locacheExpire___counter").is_some());

        // Once expired the counter restarts from zero
        f.clock.advance(Duration::from_secs(6));
        assert_eq!(f.cache.incr("counter").unwrap(), Some(1));
    }

    #[test]
    fn test_set_many_and_get_many() {
        let f = fixture();
        let mut entries = BTreeMap::new();
        entries.insert("k1", 1);
        entries.insert("k2", 2);

        f.cache.set_many(entries, None).unwrap();

        assert_eq!(
            f.cache.get_many(["k1", "k2", "k3"]),
            vec![Some(json!(1)), Some(json!(2)), None]
        );
    }

    #[test]
    fn test_set_many_applies_ttl_to_all() {
        let f = fixture();
        f.cache
            .set_many([("a", "x"), ("b", "y")], Some(2))
            .unwrap();

        f.clock.advance(Duration::from_secs(3));
        assert_eq!(f.cache.get_many(["a", "b"]), vec![None, None]);
    }

    #[test]
    fn test_set_many_stops_at_quota() {
        let storage = Arc::new(MemoryStorage::with_quota(64));
        let cache = CacheEngine::with_storage(storage.clone());
        let big = "x".repeat(30);

        let result = cache.set_many([("a", &big), ("b", &big), ("c", &big)], None);
        assert!(matches!(
            result,
            Err(CacheError::Storage(StorageError::QuotaExceeded { .. }))
        ));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_none());
    }

    #[test]
    fn test_remove_many() {
        let f = fixture();
        f.cache.set_many([("a", 1), ("b", 2), ("c", 3)], None).unwrap();
        f.cache.remove_many(["a", "c"]).unwrap();

        assert_eq!(
            f.cache.get_many(["a", "b", "c"]),
            vec![None, Some(json!(2)), None]
        );
    }

    #[test]
    fn test_flush_leaves_foreign_keys() {
        let f = fixture();
        f.storage.set("foreign", "keep me").unwrap();
        f.cache.set("mine", &1, None).unwrap();

        f.cache.flush().unwrap();

        assert_eq!(f.cache.get("mine"), None);
        assert_eq!(f.storage.get("foreign").as_deref(), Some("keep me"));
        assert_eq!(f.storage.len(), 1);
    }

    #[test]
    fn test_flush_removes_every_entry_and_orphaned_expiry() {
        let f = fixture();
        for i in 0..20 {
            f.cache.set(&format!("k{}", i), &i, Some(60)).unwrap();
        }
        f.storage.set("___locacheExpire___orphan", "123").unwrap();

        f.cache.flush().unwrap();

        assert_eq!(f.cache.length(), 0);
        assert!(f.storage.is_empty());
    }

    #[test]
    fn test_length_counts_only_value_slots() {
        let f = fixture();
        f.storage.set("foreign", "x").unwrap();
        f.cache.set("a", &1, Some(60)).unwrap();
        f.cache.set("b", &2, None).unwrap();

        assert_eq!(f.cache.length(), 2);

        // Expired entries still count until removed
        f.clock.advance(Duration::from_secs(61));
        assert_eq!(f.cache.length(), 2);
    }

    #[test]
    fn test_cleanup_removes_only_expired() {
        let f = fixture();
        f.cache.set("short1", &1, Some(1)).unwrap();
        f.cache.set("short2", &2, Some(1)).unwrap();
        f.cache.set("long", &3, Some(3600)).unwrap();
        f.cache.set("forever", &4, None).unwrap();
        f.storage.set("foreign", "x").unwrap();

        f.clock.advance(Duration::from_secs(2));

        assert_eq!(f.cache.cleanup().unwrap(), 2);
        assert_eq!(f.cache.length(), 2);
        assert_eq!(f.cache.get("long"), Some(json!(3)));
        assert_eq!(f.cache.get("forever"), Some(json!(4)));
        assert!(f.storage.get("foreign").is_some());
        assert!(f.storage.get("___locacheExpire___short1").is_none());
    }

    /// Backend that counts how the engine walks and drains it.
    #[derive(Debug, Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        indexed: AtomicUsize,
        batches: AtomicUsize,
    }

    impl StorageBackend for CountingStorage {
        fn set(&self, key: &str, value: &str) -> crate::error::StorageResult<()> {
            self.inner.set(key, value)
        }

        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn remove(&self, key: &str) -> crate::error::StorageResult<()> {
            self.inner.remove(key)
        }

        fn len(&self) -> usize {
            self.inner.len()
        }

        fn key(&self, index: usize) -> Option<String> {
            self.indexed.fetch_add(1, Ordering::SeqCst);
            self.inner.key(index)
        }

        fn keys(&self) -> Vec<String> {
            self.inner.keys()
        }

        fn remove_many(&self, keys: &[String]) -> crate::error::StorageResult<()> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            self.inner.remove_many(keys)
        }

        fn enabled(&self) -> bool {
            self.inner.enabled()
        }
    }

    #[test]
    fn test_sweeps_use_key_snapshot_and_one_batch() {
        let storage = Arc::new(CountingStorage::default());
        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache =
            create_cache(CacheOptions::new(storage.clone()).with_clock(clock.clone())).unwrap();

        for i in 0..500 {
            let ttl = if i % 2 == 0 { Some(1) } else { None };
            cache.set(&format!("k{}", i), &i, ttl).unwrap();
        }
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.length(), 500);
        assert_eq!(cache.cleanup().unwrap(), 250);
        assert_eq!(storage.batches.load(Ordering::SeqCst), 1);

        cache.flush().unwrap();
        assert_eq!(storage.batches.load(Ordering::SeqCst), 2);
        assert!(storage.is_empty());
        assert_eq!(storage.indexed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_custom_prefixes() {
        let storage = Arc::new(MemoryStorage::new());
        let cache = create_cache(
            CacheOptions::new(storage.clone())
                .with_cache_prefix("app:")
                .with_expire_prefix("app-exp:"),
        )
        .unwrap();

        cache.set("k", &1, Some(10)).unwrap();
        assert!(storage.get("app:k").is_some());
        assert!(storage.get("app-exp:k").is_some());
        assert_eq!(cache.length(), 1);
    }

    #[test]
    fn test_create_cache_rejects_clashing_prefixes() {
        let result = create_cache(
            CacheOptions::new(Arc::new(MemoryStorage::new()))
                .with_cache_prefix("same")
                .with_expire_prefix("same"),
        );
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_engines_on_different_backends_are_isolated() {
        let local = CacheEngine::with_storage(Arc::new(MemoryStorage::new()));
        let session = CacheEngine::with_storage(Arc::new(MemoryStorage::new()));

        local.set("shared", "local", None).unwrap();
        session.set("shared", "session", None).unwrap();

        assert_eq!(local.get("shared"), Some(json!("local")));
        assert_eq!(session.get("shared"), Some(json!("session")));

        session.flush().unwrap();
        assert_eq!(local.get("shared"), Some(json!("local")));
        assert_eq!(session.length(), 0);
    }

    #[test]
    fn test_clones_share_backend() {
        let f = fixture();
        let other = f.cache.clone();
        f.cache.set("k", "v", None).unwrap();
        assert_eq!(other.get("k"), Some(json!("v")));
    }

    #[test]
    fn test_disabled_backend_degrades_silently() {
        let cache = disabled_cache();
        assert!(!cache.enabled());

        cache.set("k", "v", Some(10)).unwrap();
        cache.set_many([("a", 1)], None).unwrap();
        cache.remove("k").unwrap();
        cache.remove_many(["a"]).unwrap();
        cache.flush().unwrap();

        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.get_many(["a", "b", "c"]), vec![None, None, None]);
        assert_eq!(cache.length(), 0);
        assert_eq!(cache.incr("n").unwrap(), None);
        assert_eq!(cache.decr("n").unwrap(), None);
        assert_eq!(cache.cleanup().unwrap(), 0);
        assert!(cache.storage().is_empty());
    }
}
