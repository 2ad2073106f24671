use std::sync::Arc;

use harbor_core::extraction::CommandExtractor;
use harbor_core::static_site::AssetResolver;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: harbor_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Fallback resolver for the frontend bundle.
    pub assets: Arc<AssetResolver>,
    /// PDF table-extraction tool.
    pub extractor: Arc<CommandExtractor>,
}
