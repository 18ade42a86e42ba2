//! Project route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use roadmap_core::{NewProject, OwnerId, ProductLineId, Project, ProjectId, ProjectPatch};

use super::ApiResponse;
use crate::error::{ApiJson, AppError, Result};
use crate::services::ProjectService;
use crate::state::AppState;

/// All projects.
#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<Project>,
}

/// Body for `POST /api/projects`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub product_line_id: ProductLineId,
    pub owner_id: OwnerId,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    #[serde(default)]
    pub is_pending: bool,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            name: req.name,
            product_line_id: req.product_line_id,
            owner_id: req.owner_id,
            is_pending: req.is_pending,
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
            remarks: req.remarks,
        }
    }
}

/// Body for `PUT /api/projects/{id}`. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub product_line_id: Option<ProductLineId>,
    pub owner_id: Option<OwnerId>,
    pub is_pending: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

impl From<UpdateProjectRequest> for ProjectPatch {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            name: req.name,
            product_line_id: req.product_line_id,
            owner_id: req.owner_id,
            is_pending: req.is_pending,
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
            remarks: req.remarks,
        }
    }
}

/// List every project.
///
/// GET /api/projects
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<ApiResponse<ProjectList>> {
    let projects = ProjectService::new(state.store()).list_all().await?;
    Ok(ApiResponse::ok(ProjectList { projects }))
}

/// Get one project.
///
/// GET /api/projects/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<ApiResponse<Project>> {
    let project = ProjectService::new(state.store()).get(&id).await?;
    Ok(ApiResponse::ok(project))
}

/// Create a project after checking that its product line and owner exist.
///
/// POST /api/projects
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, ApiResponse<Project>)> {
    let project = ProjectService::new(state.store())
        .create(body.into())
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(project)))
}

/// Merge a partial update into a project.
///
/// PUT /api/projects/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    ApiJson(body): ApiJson<UpdateProjectRequest>,
) -> Result<ApiResponse<Project>> {
    let patch = ProjectPatch::from(body);
    if patch.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let project = ProjectService::new(state.store())
        .update(&id, patch)
        .await?;
    Ok(ApiResponse::ok(project))
}

/// Delete a project.
///
/// DELETE /api/projects/{id}
#[instrument(skip_all, fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<ApiResponse<()>> {
    ProjectService::new(state.store()).delete(&id).await?;
    Ok(ApiResponse::message("Project deleted"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateProjectRequest = serde_json::from_str(
            r#"{"name":"支付重构","productLineId":"pl-1","ownerId":"owner-1",
                "startDate":"2025-01-01","endDate":"2025-03-31","status":"开发"}"#,
        )
        .unwrap();
        let input = NewProject::from(req);
        assert!(!input.is_pending);
        assert!(input.remarks.is_none());
        assert_eq!(input.owner_id.as_str(), "owner-1");
    }

    #[test]
    fn test_create_request_requires_owner() {
        let result = serde_json::from_str::<CreateProjectRequest>(
            r#"{"name":"x","productLineId":"pl-1",
                "startDate":"2025-01-01","endDate":"2025-03-31","status":"开发"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_update_is_empty_patch() {
        let req: UpdateProjectRequest = serde_json::from_str("{}").unwrap();
        assert!(ProjectPatch::from(req).is_empty());

        let req: UpdateProjectRequest = serde_json::from_str(r#"{"isPending":true}"#).unwrap();
        assert_eq!(ProjectPatch::from(req).is_pending, Some(true));
    }
}
