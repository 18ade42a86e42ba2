//! Liveness endpoints.

use axum::Json;
use serde::Serialize;

/// Service banner returned at `/`.
#[derive(Debug, Serialize)]
pub struct Banner {
    pub success: bool,
    pub message: &'static str,
    pub version: &'static str,
}

/// Health status returned at `/api/health`.
#[derive(Debug, Serialize)]
pub struct Health {
    pub success: bool,
    pub status: &'static str,
}

/// Service banner.
///
/// GET /
pub async fn banner() -> Json<Banner> {
    Json(Banner {
        success: true,
        message: "Roadmap API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness health check endpoint.
///
/// GET /api/health
///
/// Does not touch the data directory.
pub async fn health() -> Json<Health> {
    Json(Health {
        success: true,
        status: "healthy",
    })
}
