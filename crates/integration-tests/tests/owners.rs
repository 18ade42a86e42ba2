//! Integration tests for owner routes.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use roadmap_core::{Owner, OwnerId, PALETTE};
use roadmap_integration_tests::TestContext;

// ============================================================================
// List & Create
// ============================================================================

#[tokio::test]
async fn test_fresh_directory_lists_default_owner() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/api/owners").await;
    assert_eq!(status, StatusCode::OK);
    let owners = body["data"]["owners"].as_array().unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0]["id"], OwnerId::DEFAULT);
    assert_eq!(owners[0]["name"], Owner::DEFAULT_NAME);
    assert_eq!(owners[0]["color"], Owner::DEFAULT_COLOR);
    assert_eq!(owners[0]["projectCount"], 0);
}

#[tokio::test]
async fn test_create_assigns_next_palette_color() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.post("/api/owners", json!({ "name": " 张三 " })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "张三");
    assert_eq!(body["data"]["visible"], true);
    // The default owner already occupies the first slot.
    assert_eq!(body["data"]["color"], PALETTE[1]);

    let (_, body) = ctx.post("/api/owners", json!({ "name": "李四" })).await;
    assert_eq!(body["data"]["color"], PALETTE[2]);
}

#[tokio::test]
async fn test_create_rejects_duplicate_and_invalid_names() {
    let ctx = TestContext::new().await;
    ctx.create_owner("张三").await;

    let (status, body) = ctx.post("/api/owners", json!({ "name": "张三" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = ctx.post("/api/owners", json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .post("/api/owners", json!({ "name": "名".repeat(51) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.post("/api/owners", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_owner_fields() {
    let ctx = TestContext::new().await;
    let id = ctx.create_owner("张三").await;
    ctx.create_owner("李四").await;
    let uri = format!("/api/owners/{id}");

    let (status, body) = ctx.put(&uri, json!({ "visible": false })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["visible"], false);
    assert_eq!(body["data"]["name"], "张三");

    let (status, body) = ctx
        .put(&uri, json!({ "name": "张三丰", "color": "#00AA11" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "张三丰");
    assert_eq!(body["data"]["color"], "#00AA11");

    let (status, _) = ctx.put(&uri, json!({ "color": "red" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.put(&uri, json!({ "name": "李四" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = ctx.put(&uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = ctx.get(&uri).await;
    assert_eq!(body["data"]["name"], "张三丰");
    assert_eq!(body["data"]["visible"], false);
}

#[tokio::test]
async fn test_missing_owner_is_404() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx.get("/api/owners/owner-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .put("/api/owners/owner-missing", json!({ "visible": true }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.delete("/api/owners/owner-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.get("/api/owners/owner-missing/projects/count").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Delete & Counts
// ============================================================================

#[tokio::test]
async fn test_delete_blocked_reports_project_count() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;
    let owner = ctx.create_owner("张三").await;
    let mut projects = Vec::new();
    for name in ["对账", "退款", "结算"] {
        projects.push(ctx.create_project(name, &line, &owner).await);
    }

    let (status, body) = ctx
        .get(&format!("/api/owners/{owner}/projects/count"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ownerId"], owner.as_str());
    assert_eq!(body["data"]["projectCount"], 3);

    let (status, body) = ctx.delete(&format!("/api/owners/{owner}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["projectCount"], 3);

    let (_, body) = ctx.get("/api/owners").await;
    let listed = body["data"]["owners"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"] == owner.as_str())
        .unwrap()
        .clone();
    assert_eq!(listed["projectCount"], 3);

    for id in &projects {
        ctx.delete(&format!("/api/projects/{id}")).await;
    }
    let (status, body) = ctx.delete(&format!("/api/owners/{owner}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = ctx.get(&format!("/api/owners/{owner}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
