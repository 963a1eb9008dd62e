use axum::routing::get;
use axum::Router;

use crate::handlers::redirects;
use crate::state::AppState;

/// Curation routes, mounted at `/api/v1/admin/redirects`.
///
/// ```text
/// GET, POST            /           list (?published=&limit=&offset=), create
/// GET, PUT, DELETE     /{id}       get, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(redirects::list_redirects).post(redirects::create_redirect),
        )
        .route(
            "/{id}",
            get(redirects::get_redirect)
                .put(redirects::update_redirect)
                .delete(redirects::delete_redirect),
        )
}
