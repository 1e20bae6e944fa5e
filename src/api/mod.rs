//! API Module
//!
//! HTTP handlers and routing exposing the local and session caches.
//!
//! # Endpoints
//! - `PUT /:store/set` - Store a value
//! - `GET /:store/get/:key` - Retrieve a value by key
//! - `DELETE /:store/del/:key` - Delete a key
//! - `POST /:store/incr/:key`, `POST /:store/decr/:key` - Counters
//! - `PUT /:store/set_many`, `POST /:store/get_many`, `POST /:store/del_many` - Bulk operations
//! - `POST /:store/flush`, `GET /:store/length`, `POST /:store/cleanup` - Maintenance
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
