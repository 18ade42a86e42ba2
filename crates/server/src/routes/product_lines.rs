//! Product line route handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use roadmap_core::{ProductLine, ProductLineId};

use super::ApiResponse;
use crate::error::{ApiJson, Result};
use crate::services::ProductLineService;
use crate::state::AppState;

/// Product lines in display order.
#[derive(Debug, Serialize)]
pub struct ProductLineList {
    pub productlines: Vec<ProductLine>,
}

/// Body for creating or renaming a product line.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// One entry of a reorder request.
#[derive(Debug, Deserialize)]
pub struct OrderEntry {
    pub id: ProductLineId,
    pub order: u32,
}

/// Body for `PUT /api/productlines/reorder`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub order_list: Vec<OrderEntry>,
}

/// List product lines sorted by `order`.
///
/// GET /api/productlines
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<ApiResponse<ProductLineList>> {
    let productlines = ProductLineService::new(state.store()).list_all().await?;
    Ok(ApiResponse::ok(ProductLineList { productlines }))
}

/// Create a product line at the end of the display order.
///
/// POST /api/productlines
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NameRequest>,
) -> Result<(StatusCode, ApiResponse<ProductLine>)> {
    let line = ProductLineService::new(state.store())
        .create(&body.name)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(line)))
}

/// Get one product line.
///
/// GET /api/productlines/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductLineId>,
) -> Result<ApiResponse<ProductLine>> {
    let line = ProductLineService::new(state.store()).get(&id).await?;
    Ok(ApiResponse::ok(line))
}

/// Rename a product line.
///
/// PUT /api/productlines/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductLineId>,
    ApiJson(body): ApiJson<NameRequest>,
) -> Result<ApiResponse<ProductLine>> {
    let line = ProductLineService::new(state.store())
        .rename(&id, &body.name)
        .await?;
    Ok(ApiResponse::ok(line))
}

/// Delete a product line no project references.
///
/// DELETE /api/productlines/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductLineId>,
) -> Result<ApiResponse<()>> {
    ProductLineService::new(state.store()).delete(&id).await?;
    Ok(ApiResponse::message("Product line deleted"))
}

/// Apply a new display order and return the sorted list.
///
/// PUT /api/productlines/reorder
#[instrument(skip_all)]
pub async fn reorder(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ReorderRequest>,
) -> Result<ApiResponse<ProductLineList>> {
    let order_map: HashMap<ProductLineId, u32> = body
        .order_list
        .into_iter()
        .map(|entry| (entry.id, entry.order))
        .collect();

    let productlines = ProductLineService::new(state.store())
        .reorder(&order_map)
        .await?;
    Ok(ApiResponse::ok(ProductLineList { productlines }))
}
