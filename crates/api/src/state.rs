use std::sync::Arc;

use relink_core::resolver::RedirectResolver;
use relink_core::store::RuleStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: relink_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Rule store shared with the resolver.
    pub store: Arc<dyn RuleStore>,
    /// Resolves unmatched requests against the redirect table.
    pub resolver: Arc<RedirectResolver>,
}
