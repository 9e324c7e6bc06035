pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use store::Store;

/// Shared application state passed to all Axum handlers.
///
/// The store is a trait object so the Mongo-backed implementation can be
/// swapped for an in-memory one in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: config::AppConfig,
}
