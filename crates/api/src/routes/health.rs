use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when redirects can be resolved, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the connection pool answers at all.
    pub database: bool,
    /// Whether the redirect table can be read.
    pub rule_store: bool,
    /// Whether missing pages are recorded for curation.
    pub collecting_misses: bool,
}

/// GET /health -- reports whether 404s can be resolved against the rule store.
///
/// A reachable database with an unreadable rule table still serves pages, but
/// every miss renders the "error updating database" page.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = relink_db::health_check(&state.pool).await.is_ok();
    let rule_store = match state.store.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Rule store unavailable");
            false
        }
    };

    Json(HealthResponse {
        status: if database && rule_store { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        rule_store,
        collecting_misses: state.config.redirect.collect_urls,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
