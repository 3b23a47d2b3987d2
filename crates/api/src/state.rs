use std::sync::Arc;

use lantern_cloud::BlobStore;

use crate::config::ServerConfig;
use crate::sessions::SessionManager;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lantern_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Blob store holding uploaded card images.
    pub blob_store: Arc<dyn BlobStore>,
    /// In-memory viewing sessions.
    pub sessions: Arc<SessionManager>,
}
