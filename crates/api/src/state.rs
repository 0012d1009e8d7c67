use std::sync::Arc;

use picshelf_db::store::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage directory + metadata table.
    pub store: Arc<dyn ImageStore>,
    /// Server configuration, fixed at startup.
    pub config: Arc<ServerConfig>,
}
