//! API Handlers
//!
//! HTTP request handlers exposing the local and session caches.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheEngine, Caches};
use crate::error::{CacheError, Result};
use crate::models::{
    BulkResponse, CleanupResponse, CounterResponse, DeleteResponse, GetManyResponse,
    GetResponse, HealthResponse, KeysRequest, LengthResponse, SetManyRequest, SetRequest,
    SetResponse, StoreKind,
};

/// Application state shared across all handlers.
///
/// Engines are cheap to clone and synchronize inside their backends, so no
/// outer lock is needed.
#[derive(Debug, Clone)]
pub struct AppState {
    pub caches: Caches,
}

impl AppState {
    /// Creates a new AppState around the given caches.
    pub fn new(caches: Caches) -> Self {
        Self { caches }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Ok(Self::new(Caches::from_config(config)?))
    }

    /// The cache a request path addresses.
    pub fn cache(&self, store: StoreKind) -> &CacheEngine {
        match store {
            StoreKind::Local => &self.caches.local,
            StoreKind::Session => &self.caches.session,
        }
    }
}

/// Runs `op` against `cache` on the blocking thread pool.
///
/// The durable backend writes its file synchronously while holding its lock,
/// so cache calls stay off the async workers.
async fn run_blocking<T, F>(cache: &CacheEngine, op: F) -> Result<T>
where
    F: FnOnce(&CacheEngine) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let cache = cache.clone();
    tokio::task::spawn_blocking(move || op(&cache)).await?
}

/// Handler for PUT /:store/set
pub async fn set_handler(
    State(state): State<AppState>,
    Path(store): Path<StoreKind>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let SetRequest { key, value, ttl } = req;
    let stored = key.clone();
    run_blocking(state.cache(store), move |cache| cache.set(&stored, &value, ttl)).await?;

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /:store/get/:key
///
/// A key that is missing, expired or holds unreadable data is a 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((store, key)): Path<(StoreKind, String)>,
) -> Result<Json<GetResponse>> {
    let lookup = key.clone();
    // Reading an expired entry removes it, which may write
    let value = run_blocking(state.cache(store), move |cache| Ok(cache.get(&lookup)))
        .await?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /:store/del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((store, key)): Path<(StoreKind, String)>,
) -> Result<Json<DeleteResponse>> {
    let doomed = key.clone();
    run_blocking(state.cache(store), move |cache| cache.remove(&doomed)).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /:store/incr/:key
pub async fn incr_handler(
    State(state): State<AppState>,
    Path((store, key)): Path<(StoreKind, String)>,
) -> Result<Json<CounterResponse>> {
    let counter = key.clone();
    let value = run_blocking(state.cache(store), move |cache| cache.incr(&counter)).await?;

    Ok(Json(CounterResponse::new(key, value)))
}

/// Handler for POST /:store/decr/:key
pub async fn decr_handler(
    State(state): State<AppState>,
    Path((store, key)): Path<(StoreKind, String)>,
) -> Result<Json<CounterResponse>> {
    let counter = key.clone();
    let value = run_blocking(state.cache(store), move |cache| cache.decr(&counter)).await?;

    Ok(Json(CounterResponse::new(key, value)))
}

/// Handler for PUT /:store/set_many
pub async fn set_many_handler(
    State(state): State<AppState>,
    Path(store): Path<StoreKind>,
    Json(req): Json<SetManyRequest>,
) -> Result<Json<BulkResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let count = req.entries.len();
    run_blocking(state.cache(store), move |cache| {
        cache.set_many(&req.entries, req.ttl)
    })
    .await?;

    Ok(Json(BulkResponse::new("Set", count)))
}

/// Handler for POST /:store/get_many
pub async fn get_many_handler(
    State(state): State<AppState>,
    Path(store): Path<StoreKind>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<GetManyResponse>> {
    let values = run_blocking(state.cache(store), move |cache| {
        Ok(cache.get_many(&req.keys))
    })
    .await?;

    Ok(Json(GetManyResponse::new(values)))
}

/// Handler for POST /:store/del_many
pub async fn delete_many_handler(
    State(state): State<AppState>,
    Path(store): Path<StoreKind>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<BulkResponse>> {
    let count = req.keys.len();
    run_blocking(state.cache(store), move |cache| cache.remove_many(&req.keys)).await?;

    Ok(Json(BulkResponse::new("Removed", count)))
}

/// Handler for POST /:store/flush
pub async fn flush_handler(
    State(state): State<AppState>,
    Path(store): Path<StoreKind>,
) -> Result<Json<BulkResponse>> {
    let count = run_blocking(state.cache(store), |cache| {
        let count = cache.length();
        cache.flush()?;
        Ok(count)
    })
    .await?;

    Ok(Json(BulkResponse::new("Flushed", count)))
}

/// Handler for GET /:store/length
pub async fn length_handler(
    State(state): State<AppState>,
    Path(store): Path<StoreKind>,
) -> Json<LengthResponse> {
    Json(LengthResponse {
        length: state.cache(store).length(),
    })
}

/// Handler for POST /:store/cleanup
pub async fn cleanup_handler(
    State(state): State<AppState>,
    Path(store): Path<StoreKind>,
) -> Result<Json<CleanupResponse>> {
    let removed = run_blocking(state.cache(store), |cache| cache.cleanup()).await?;

    Ok(Json(CleanupResponse { removed }))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.caches.local.enabled(),
        state.caches.session.enabled(),
    ))
}
