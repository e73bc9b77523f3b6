use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mural_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Thumbnail rasterizer; holds the parsed font database.
    pub renderer: Arc<mural_thumbnail::Renderer>,
}
