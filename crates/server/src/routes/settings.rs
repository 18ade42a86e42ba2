//! Settings route handlers.

use axum::extract::State;
use serde::Deserialize;
use tracing::instrument;

use roadmap_core::{ProductLineId, Settings};

use super::ApiResponse;
use crate::error::{ApiJson, Result};
use crate::services::SettingsService;
use crate::state::AppState;

/// Body for `PUT /api/settings/visible-productlines`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleProductLinesRequest {
    #[serde(default)]
    pub product_line_ids: Vec<ProductLineId>,
}

/// Current settings, or the defaults.
///
/// GET /api/settings
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>) -> ApiResponse<Settings> {
    ApiResponse::ok(SettingsService::new(state.store()).get().await)
}

/// Replace the list of visible product lines.
///
/// PUT /api/settings/visible-productlines
#[instrument(skip_all)]
pub async fn update_visible(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<VisibleProductLinesRequest>,
) -> Result<ApiResponse<Settings>> {
    let settings = SettingsService::new(state.store())
        .set_visible_product_lines(body.product_line_ids)
        .await?;
    Ok(ApiResponse::ok(settings).with_message("Settings saved"))
}

/// Restore the default settings.
///
/// POST /api/settings/reset
#[instrument(skip_all)]
pub async fn reset(State(state): State<AppState>) -> Result<ApiResponse<Settings>> {
    let settings = SettingsService::new(state.store()).reset().await?;
    Ok(ApiResponse::ok(settings).with_message("Settings reset"))
}
