//! Owner route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use roadmap_core::{Owner, OwnerId, OwnerPatch};

use super::ApiResponse;
use crate::error::{ApiJson, AppError, Result};
use crate::services::{OwnerService, OwnerWithCount};
use crate::state::AppState;

/// Owners with their project counts.
#[derive(Debug, Serialize)]
pub struct OwnerList {
    pub owners: Vec<OwnerWithCount>,
}

/// Project count for one owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCount {
    pub owner_id: OwnerId,
    pub project_count: usize,
}

/// Body for `POST /api/owners`.
#[derive(Debug, Deserialize)]
pub struct CreateOwnerRequest {
    pub name: String,
}

/// Body for `PUT /api/owners/{id}`. Absent fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateOwnerRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub visible: Option<bool>,
}

/// List owners in stored order, each with its project count.
///
/// GET /api/owners
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<ApiResponse<OwnerList>> {
    let owners = OwnerService::new(state.store()).list_with_counts().await?;
    Ok(ApiResponse::ok(OwnerList { owners }))
}

/// Create an owner with the next palette color.
///
/// POST /api/owners
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateOwnerRequest>,
) -> Result<(StatusCode, ApiResponse<Owner>)> {
    let owner = OwnerService::new(state.store()).create(&body.name).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(owner)))
}

/// Get one owner.
///
/// GET /api/owners/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
) -> Result<ApiResponse<Owner>> {
    let owner = OwnerService::new(state.store()).get(&id).await?;
    Ok(ApiResponse::ok(owner))
}

/// Update an owner's name, color, or visibility.
///
/// PUT /api/owners/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
    ApiJson(body): ApiJson<UpdateOwnerRequest>,
) -> Result<ApiResponse<Owner>> {
    let patch = OwnerPatch {
        name: body.name,
        color: body.color,
        visible: body.visible,
    };
    if patch.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let owner = OwnerService::new(state.store()).update(&id, patch).await?;
    Ok(ApiResponse::ok(owner))
}

/// Delete an owner no project is assigned to.
///
/// DELETE /api/owners/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
) -> Result<ApiResponse<()>> {
    OwnerService::new(state.store()).delete(&id).await?;
    Ok(ApiResponse::message("Owner deleted"))
}

/// Number of projects assigned to an owner.
///
/// GET /api/owners/{id}/projects/count
#[instrument(skip_all, fields(id = %id))]
pub async fn project_count(
    State(state): State<AppState>,
    Path(id): Path<OwnerId>,
) -> Result<ApiResponse<ProjectCount>> {
    let service = OwnerService::new(state.store());
    let owner = service.get(&id).await?;
    let project_count = service.project_count(&owner.id).await;

    Ok(ApiResponse::ok(ProjectCount {
        owner_id: owner.id,
        project_count,
    }))
}
