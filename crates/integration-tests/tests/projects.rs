//! Integration tests for project routes.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use roadmap_core::OwnerId;
use roadmap_integration_tests::{TestContext, id_of, project_body};
use roadmap_server::store::StoreKey;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_project() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;
    let owner = ctx.create_owner("张三").await;

    let mut body = project_body("对账平台", &line, &owner);
    body["isPending"] = json!(true);
    body["remarks"] = json!("二期");
    let (status, created) = ctx.post("/api/projects", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], "对账平台");
    assert_eq!(created["data"]["isPending"], true);
    assert_eq!(created["data"]["startDate"], "2025-01-01");
    assert_eq!(created["data"]["status"], "开发");
    assert_eq!(created["data"]["remarks"], "二期");

    let id = id_of(&created);
    assert!(id.starts_with("proj-"));

    let (status, fetched) = ctx.get(&format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);

    let (_, list) = ctx.get("/api/projects").await;
    assert_eq!(list["data"]["projects"].as_array().unwrap().len(), 1);

    let stored = ctx.read_file(StoreKey::Projects);
    assert_eq!(stored["projects"][0]["ownerId"], owner.as_str());
}

#[tokio::test]
async fn test_create_defaults_optional_fields() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;

    let (status, body) = ctx
        .post("/api/projects", project_body("对账", &line, OwnerId::DEFAULT))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["isPending"], false);
    assert_eq!(body["data"]["remarks"], "");
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;

    for field in ["name", "productLineId", "ownerId", "startDate", "endDate", "status"] {
        let mut body = project_body("对账", &line, OwnerId::DEFAULT);
        body.as_object_mut().unwrap().remove(field);
        let (status, response) = ctx.post("/api/projects", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(response["success"], false);
    }
}

#[tokio::test]
async fn test_create_validates_dates_and_status() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;

    let mut body = project_body("对账", &line, OwnerId::DEFAULT);
    body["endDate"] = json!("2024-12-31");
    let (status, _) = ctx.post("/api/projects", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = project_body("对账", &line, OwnerId::DEFAULT);
    body["endDate"] = json!("2025-01-01");
    let (status, _) = ctx.post("/api/projects", body).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut body = project_body("对账", &line, OwnerId::DEFAULT);
    body["startDate"] = json!("2025/01/01");
    let (status, _) = ctx.post("/api/projects", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = project_body("对账", &line, OwnerId::DEFAULT);
    body["status"] = json!("完成");
    let (status, _) = ctx.post("/api/projects", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_dangling_references() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;

    let (status, body) = ctx
        .post("/api/projects", project_body("对账", "pl-gone", OwnerId::DEFAULT))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("productLineId"));

    let (status, body) = ctx
        .post("/api/projects", project_body("对账", &line, "owner-gone"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("ownerId"));

    let stored = ctx.read_file(StoreKey::Projects);
    assert!(stored["projects"].as_array().unwrap().is_empty());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_partial_update() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;
    let other_line = ctx.create_product_line("会员").await;
    let id = ctx.create_project("对账", &line, OwnerId::DEFAULT).await;

    let (status, body) = ctx
        .put(
            &format!("/api/projects/{id}"),
            json!({ "status": "测试", "productLineId": &other_line }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "测试");
    assert_eq!(body["data"]["productLineId"], other_line.as_str());
    assert_eq!(body["data"]["name"], "对账");
    assert_eq!(body["data"]["endDate"], "2025-03-31");
}

#[tokio::test]
async fn test_update_rejects_empty_and_invalid() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;
    let id = ctx.create_project("对账", &line, OwnerId::DEFAULT).await;
    let uri = format!("/api/projects/{id}");

    let (status, body) = ctx.put(&uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = ctx.put(&uri, json!({ "endDate": "2024-01-01" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.put(&uri, json!({ "ownerId": "owner-gone" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = ctx.get(&uri).await;
    assert_eq!(body["data"]["endDate"], "2025-03-31");
    assert_eq!(body["data"]["ownerId"], OwnerId::DEFAULT);
}

// ============================================================================
// Delete & Not Found
// ============================================================================

#[tokio::test]
async fn test_delete_project() {
    let ctx = TestContext::new().await;
    let line = ctx.create_product_line("支付").await;
    let id = ctx.create_project("对账", &line, OwnerId::DEFAULT).await;

    let (status, body) = ctx.delete(&format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = ctx.delete(&format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_project_is_404() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/api/projects/proj-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = ctx
        .put("/api/projects/proj-missing", json!({ "name": "x" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
