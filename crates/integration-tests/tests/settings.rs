//! Integration tests for settings routes.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use roadmap_integration_tests::TestContext;
use roadmap_server::store::StoreKey;

#[tokio::test]
async fn test_defaults_when_never_saved() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "visibleProductLines": [] }));
    assert!(!ctx.path(StoreKey::Settings).exists());
}

#[tokio::test]
async fn test_save_and_reset_visible_product_lines() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .put(
            "/api/settings/visible-productlines",
            json!({ "productLineIds": ["pl-2", "pl-1"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["visibleProductLines"], json!(["pl-2", "pl-1"]));
    assert!(body["message"].is_string());

    let (_, body) = ctx.get("/api/settings").await;
    assert_eq!(body["data"]["visibleProductLines"], json!(["pl-2", "pl-1"]));
    assert_eq!(
        ctx.read_file(StoreKey::Settings),
        json!({ "visibleProductLines": ["pl-2", "pl-1"] })
    );

    let (status, body) = ctx.post("/api/settings/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "visibleProductLines": [] }));

    let (_, body) = ctx.get("/api/settings").await;
    assert_eq!(body["data"], json!({ "visibleProductLines": [] }));
}

#[tokio::test]
async fn test_missing_ids_clear_the_list() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .put("/api/settings/visible-productlines", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["visibleProductLines"], json!([]));
}

#[tokio::test]
async fn test_rejects_non_array_ids() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .put(
            "/api/settings/visible-productlines",
            json!({ "productLineIds": "pl-1" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = ctx
        .put(
            "/api/settings/visible-productlines",
            json!({ "productLineIds": [" "] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_corrupt_settings_fall_back_to_defaults() {
    let ctx = TestContext::with_files(&[(StoreKey::Settings, "{ not json")]).await;

    let (status, body) = ctx.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "visibleProductLines": [] }));
}
