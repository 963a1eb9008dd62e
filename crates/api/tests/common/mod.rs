#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use relink_api::config::ServerConfig;
use relink_api::router::{build_app_router, build_state};
use relink_core::config::RedirectConfig;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// `http://localhost/` as site base and custom status codes enabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        site_base_url: "http://localhost/".to_string(),
        admin_path_prefix: "/administrator".to_string(),
        redirect: RedirectConfig {
            collect_urls: true,
            mode: true,
        },
    }
}

/// Build the full application router, exactly as production does.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(build_state(pool, test_config()))
}

/// Like [`build_test_app`] with custom redirect settings.
pub fn build_test_app_with(pool: PgPool, redirect: RedirectConfig) -> Router {
    let config = ServerConfig {
        redirect,
        ..test_config()
    };
    build_app_router(build_state(pool, config))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, method, uri, Body::from(json.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert a curated rule directly.
pub async fn insert_rule(
    pool: &PgPool,
    old_url: &str,
    new_url: &str,
    header: Option<i32>,
    published: bool,
) {
    sqlx::query(
        "INSERT INTO redirect_links (old_url, new_url, header, published) VALUES ($1, $2, $3, $4)",
    )
    .bind(old_url)
    .bind(new_url)
    .bind(header)
    .bind(published)
    .execute(pool)
    .await
    .unwrap();
}

/// Hit counter for `old_url`, `None` if no row exists.
pub async fn hits(pool: &PgPool, old_url: &str) -> Option<i64> {
    sqlx::query_scalar::<_, i64>("SELECT hits FROM redirect_links WHERE old_url = $1")
        .bind(old_url)
        .fetch_optional(pool)
        .await
        .unwrap()
}
