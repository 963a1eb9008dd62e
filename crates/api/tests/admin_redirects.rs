//! Integration tests for the redirect curation API.

mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use common::{body_json, get, send, send_json};
use relink_core::config::RedirectConfig;
use serde_json::json;
use sqlx::PgPool;

const BASE: &str = "/api/v1/admin/redirects";

/// Create a redirect through the API and return its id.
async fn create(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = send_json(app, Method::POST, BASE, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_created_row(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::POST,
        BASE,
        json!({ "old_url": "/old", "new_url": "/new", "published": true, "header": 302 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["old_url"], "/old");
    assert_eq!(json["data"]["new_url"], "/new");
    assert_eq!(json["data"]["header"], 302);
    assert_eq!(json["data"]["hits"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_out_of_range_header(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::POST,
        BASE,
        json!({ "old_url": "/old", "new_url": "/new", "header": 200 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_published_redirect_without_destination(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::POST,
        BASE,
        json!({ "old_url": "/old", "published": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_gone_rule_without_destination_depends_on_mode(pool: PgPool) {
    let gone = json!({ "old_url": "/retired", "published": true, "header": 410 });

    // Without custom codes the rule would redirect with 301.
    let app = common::build_test_app_with(pool.clone(), RedirectConfig::default());
    let response = send_json(app, Method::POST, BASE, gone.clone()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = send_json(app, Method::POST, BASE, gone).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_duplicate_old_url_conflicts(pool: PgPool) {
    create(&pool, json!({ "old_url": "/dup", "new_url": "/a" })).await;
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::POST,
        BASE,
        json!({ "old_url": "/dup", "new_url": "/b" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_shows_collected_misses(pool: PgPool) {
    // Collect a miss through the public surface.
    let app = common::build_test_app(pool.clone());
    get(app, "/missing-page").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("{BASE}?published=false")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["old_url"], "http://localhost/missing-page");
    assert_eq!(data[0]["published"], false);
    assert_eq!(data[0]["hits"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, &format!("{BASE}/999")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "RedirectLink with id 999 not found");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn publishing_a_collected_miss_makes_it_redirect(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    get(app, "/was-missing").await;

    let id: i64 = sqlx::query_scalar("SELECT id FROM redirect_links WHERE old_url = $1")
        .bind("http://localhost/was-missing")
        .fetch_one(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = send_json(
        app,
        Method::PUT,
        &format!("{BASE}/{id}"),
        json!({ "new_url": "/found-it", "published": true, "header": 301 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/was-missing").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()["location"], "http://localhost/found-it");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_cannot_publish_empty_destination(pool: PgPool) {
    let id = create(&pool, json!({ "old_url": "/draft" })).await;
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::PUT,
        &format!("{BASE}/{id}"),
        json!({ "published": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_row(pool: PgPool) {
    let id = create(&pool, json!({ "old_url": "/bye", "new_url": "/x" })).await;

    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::DELETE, &format!("{BASE}/{id}"), Body::empty()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = send(app, Method::DELETE, &format!("{BASE}/{id}"), Body::empty()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
