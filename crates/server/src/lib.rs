//! Roadmap Server library.
//!
//! HTTP API over a directory of flat JSON files. Exposed as a library so the
//! router can be driven in-process by tests and the store and migrations can
//! be reused by the CLI.
//!
//! # Architecture
//!
//! ```text
//! routes  ->  services  ->  roadmap_core validators  ->  store
//! ```
//!
//! - [`store`] - One JSON document per collection, per-file async locks
//! - [`services`] - Referential integrity, ordering, settings, migration
//! - [`routes`] - Axum handlers and the success envelope
//! - [`error`] - Service errors mapped to HTTP status codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    Router,
    http::{Method, header},
};
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::services::{MigrationReport, Migrator};
use crate::state::AppState;
use crate::store::{FileStore, StoreError};

/// Build the router with tracing and CORS layers applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config().cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    routes::routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors)
        .with_state(state)
}

/// Build the complete HTTP service: the router wrapped in Sentry layers,
/// with trailing slashes trimmed before routing.
pub fn app(state: AppState) -> NormalizePath<Router> {
    let router = router(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Bring a data directory up to date before serving it.
///
/// Runs the owner migration if it has work to do, then creates any missing
/// collection files. Returns the migration report when a migration ran.
///
/// # Errors
///
/// Returns `StoreError` if the empty collection files cannot be created.
/// A failed migration is logged and reported, not returned.
pub async fn prepare_data_dir(store: &FileStore) -> Result<Option<MigrationReport>, StoreError> {
    let migrator = Migrator::new(store);

    let report = if migrator.check_migration_needed().await {
        tracing::info!(data_dir = %store.data_dir().display(), "Running owner migration");
        let report = migrator.migrate_owners().await;
        if !report.success {
            tracing::warn!(errors = ?report.errors, "Owner migration incomplete");
        }
        Some(report)
    } else {
        None
    };

    migrator.bootstrap_collections().await?;
    Ok(report)
}
