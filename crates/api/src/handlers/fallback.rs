//! Catch-all handlers that hand unrouted requests to the redirect resolver.

use axum::extract::State;
use axum::http::{HeaderMap, Uri};
use axum::response::Response;
use relink_core::error::ErrorReport;

use crate::context::request_context;
use crate::render::render;
use crate::state::AppState;

/// Any path with no matching route.
pub async fn not_found(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    resolve(&state, &uri, &headers, ErrorReport::new(404, "Page not found")).await
}

/// A known path requested with the wrong method. Goes through the resolver
/// like any other failure, which forwards it untouched.
pub async fn method_not_allowed(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    resolve(&state, &uri, &headers, ErrorReport::new(405, "Method not allowed")).await
}

async fn resolve(state: &AppState, uri: &Uri, headers: &HeaderMap, error: ErrorReport) -> Response {
    let ctx = request_context(uri, headers, &state.config);
    render(state.resolver.resolve(&error, &ctx).await)
}
