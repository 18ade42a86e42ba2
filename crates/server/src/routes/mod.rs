//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Service banner
//! GET  /api/health                        - Health check
//!
//! # Product lines
//! GET    /api/productlines                - List in display order
//! POST   /api/productlines                - Create
//! PUT    /api/productlines/reorder        - Set display order
//! GET    /api/productlines/{id}           - Get one
//! PUT    /api/productlines/{id}           - Rename
//! DELETE /api/productlines/{id}           - Delete (403 while referenced)
//!
//! # Projects
//! GET    /api/projects                    - List
//! POST   /api/projects                    - Create
//! GET    /api/projects/{id}               - Get one
//! PUT    /api/projects/{id}               - Partial update
//! DELETE /api/projects/{id}               - Delete
//!
//! # Owners
//! GET    /api/owners                      - List with project counts
//! POST   /api/owners                      - Create
//! GET    /api/owners/{id}                 - Get one
//! PUT    /api/owners/{id}                 - Partial update
//! DELETE /api/owners/{id}                 - Delete (400 while referenced)
//! GET    /api/owners/{id}/projects/count  - Project count
//!
//! # Settings
//! GET    /api/settings                    - Current settings
//! PUT    /api/settings/visible-productlines - Replace visible product lines
//! POST   /api/settings/reset              - Restore defaults
//! ```
//!
//! Every JSON response carries `success`. Successful responses put their
//! payload under `data` and may add a human-readable `message`.

pub mod health;
pub mod owners;
pub mod product_lines;
pub mod projects;
pub mod settings;

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Attach a message to the response.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Successful response with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Create the product line routes router.
pub fn product_line_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(product_lines::index).post(product_lines::create))
        .route("/reorder", put(product_lines::reorder))
        .route(
            "/{id}",
            get(product_lines::show)
                .put(product_lines::update)
                .delete(product_lines::delete),
        )
}

/// Create the project routes router.
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::index).post(projects::create))
        .route(
            "/{id}",
            get(projects::show)
                .put(projects::update)
                .delete(projects::delete),
        )
}

/// Create the owner routes router.
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(owners::index).post(owners::create))
        .route(
            "/{id}",
            get(owners::show).put(owners::update).delete(owners::delete),
        )
        .route("/{id}/projects/count", get(owners::project_count))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::show))
        .route("/visible-productlines", put(settings::update_visible))
        .route("/reset", post(settings::reset))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::banner))
        .route("/api/health", get(health::health))
        .nest("/api/productlines", product_line_routes())
        .nest("/api/projects", project_routes())
        .nest("/api/owners", owner_routes())
        .nest("/api/settings", settings_routes())
}
