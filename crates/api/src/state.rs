use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::LocalStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and HTTP client are reference-counted
/// internally and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fundify_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// File storage for uploaded images and content.
    pub storage: Arc<LocalStorage>,
    /// Outbound HTTP client (payment gateway).
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(pool: fundify_db::DbPool, config: ServerConfig) -> Self {
        let storage = LocalStorage::new(
            config.uploads.upload_dir.clone(),
            config.uploads.public_base_url.clone(),
        );
        Self {
            pool,
            config: Arc::new(config),
            storage: Arc::new(storage),
            http: reqwest::Client::new(),
        }
    }
}
