//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, decr_handler, delete_handler, delete_many_handler, flush_handler,
    get_handler, get_many_handler, health_handler, incr_handler, length_handler,
    set_handler, set_many_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// `:store` is either `local` or `session`; anything else is rejected by
/// the path extractor.
///
/// # Endpoints
/// - `PUT /:store/set` - Store a value with optional TTL
/// - `GET /:store/get/:key` - Retrieve a value by key
/// - `DELETE /:store/del/:key` - Delete a key
/// - `POST /:store/incr/:key`, `POST /:store/decr/:key` - Step a counter
/// - `PUT /:store/set_many` - Store several values
/// - `POST /:store/get_many` - Retrieve several values
/// - `POST /:store/del_many` - Delete several keys
/// - `POST /:store/flush` - Remove every cache entry
/// - `GET /:store/length` - Count cache entries
/// - `POST /:store/cleanup` - Remove expired entries
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/:store/set", put(set_handler))
        .route("/:store/get/:key", get(get_handler))
        .route("/:store/del/:key", delete(delete_handler))
        .route("/:store/incr/:key", post(incr_handler))
        .route("/:store/decr/:key", post(decr_handler))
        .route("/:store/set_many", put(set_many_handler))
        .route("/:store/get_many", post(get_many_handler))
        .route("/:store/del_many", post(delete_many_handler))
        .route("/:store/flush", post(flush_handler))
        .route("/:store/length", get(length_handler))
        .route("/:store/cleanup", post(cleanup_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
