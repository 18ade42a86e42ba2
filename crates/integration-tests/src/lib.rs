//! Integration tests for the roadmap backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p roadmap-integration-tests
//! ```
//!
//! Each test gets its own temporary data directory and drives the full
//! HTTP service in-process, so no server or network is needed.
//!
//! # Test Categories
//!
//! - `product_lines` - Product line CRUD, ordering, delete protection
//! - `projects` - Project CRUD and reference checks
//! - `owners` - Owner CRUD, colors, project counts
//! - `settings` - Visible product lines and reset
//! - `startup` - Data directory preparation and migration

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use roadmap_server::config::ServerConfig;
use roadmap_server::services::MigrationReport;
use roadmap_server::state::AppState;
use roadmap_server::store::StoreKey;

/// A prepared data directory and the HTTP service serving it.
pub struct TestContext {
    dir: TempDir,
    app: NormalizePath<Router>,
    /// Report of the startup migration, if one ran.
    pub migration: Option<MigrationReport>,
}

impl TestContext {
    /// Fresh, empty data directory prepared the way the server does on
    /// startup.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created or prepared.
    pub async fn new() -> Self {
        Self::with_files(&[]).await
    }

    /// Data directory seeded with raw file contents before startup
    /// preparation runs.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created, written, or
    /// prepared.
    pub async fn with_files(files: &[(StoreKey, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for (key, contents) in files {
            std::fs::write(dir.path().join(key.file_name()), contents)
                .expect("Failed to seed data file");
        }

        let state = AppState::new(ServerConfig::for_data_dir(dir.path()));
        let migration = roadmap_server::prepare_data_dir(state.store())
            .await
            .expect("Failed to prepare data dir");
        let app = roadmap_server::app(state);

        Self {
            dir,
            app,
            migration,
        }
    }

    /// Path of the file behind `key`.
    #[must_use]
    pub fn path(&self, key: StoreKey) -> PathBuf {
        self.dir.path().join(key.file_name())
    }

    /// Parsed contents of the file behind `key`.
    ///
    /// # Panics
    ///
    /// Panics if the file is missing or not JSON.
    #[must_use]
    pub fn read_file(&self, key: StoreKey) -> Value {
        let text = std::fs::read_to_string(self.path(key)).expect("Failed to read data file");
        serde_json::from_str(&text).expect("Data file is not JSON")
    }

    /// Send a request and return the status with the parsed JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Service is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };
        (status, value)
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    /// POST `body` to `uri`.
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    /// PUT `body` to `uri`.
    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    /// DELETE `uri`.
    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a product line and return its id.
    ///
    /// # Panics
    ///
    /// Panics if creation does not return 201.
    pub async fn create_product_line(&self, name: &str) -> String {
        let (status, body) = self
            .post("/api/productlines", json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }

    /// Create an owner and return its id.
    ///
    /// # Panics
    ///
    /// Panics if creation does not return 201.
    pub async fn create_owner(&self, name: &str) -> String {
        let (status, body) = self.post("/api/owners", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }

    /// Create a project with valid dates and status and return its id.
    ///
    /// # Panics
    ///
    /// Panics if creation does not return 201.
    pub async fn create_project(&self, name: &str, product_line_id: &str, owner_id: &str) -> String {
        let (status, body) = self
            .post(
                "/api/projects",
                project_body(name, product_line_id, owner_id),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }
}

/// A valid project creation body.
#[must_use]
pub fn project_body(name: &str, product_line_id: &str, owner_id: &str) -> Value {
    json!({
        "name": name,
        "productLineId": product_line_id,
        "ownerId": owner_id,
        "startDate": "2025-01-01",
        "endDate": "2025-03-31",
        "status": "开发",
    })
}

/// `data.id` of a success envelope.
///
/// # Panics
///
/// Panics if the body has no string id.
#[must_use]
pub fn id_of(body: &Value) -> String {
    body.pointer("/data/id")
        .and_then(Value::as_str)
        .expect("Response has no data.id")
        .to_owned()
}
