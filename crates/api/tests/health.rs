//! Health reporting and the middleware every response passes through.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use relink_core::config::RedirectConfig;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_readable_rule_store(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert_eq!(json["rule_store"], true);
    assert_eq!(json["collecting_misses"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_degraded_without_redirect_table(pool: PgPool) {
    sqlx::query("DROP TABLE redirect_links")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], true);
    assert_eq!(json["rule_store"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reflects_collection_setting(pool: PgPool) {
    let app = common::build_test_app_with(
        pool,
        RedirectConfig {
            collect_urls: false,
            mode: true,
        },
    );

    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["collecting_misses"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolved_404_carries_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/no-such-page").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Missing x-request-id header")
        .to_str()
        .unwrap();
    assert_eq!(request_id.len(), 36, "x-request-id should be a UUID string");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn curation_api_allows_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/admin/redirects/1")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    let allow_methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(
        allow_methods.contains("PUT"),
        "Allow-Methods should contain PUT, got: {allow_methods}"
    );
}
