pub mod health;
pub mod redirects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/redirects                 list, create
/// /admin/redirects/{id}            get, update, delete
/// ```
///
/// Everything else falls through to the redirect resolver.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin/redirects", redirects::router())
}
