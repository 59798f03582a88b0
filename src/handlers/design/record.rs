// handlers/design/record.rs - single design system handlers
use axum::Extension;
use tracing::info;

use crate::database::models::{DeleteOutcome, DesignSystem, DesignSystemUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, PathParam, ValidJson};
use crate::state::AppState;

const NOT_FOUND: &str = "Design system not found";

/// GET /api/v1/design/active - the currently active design system
pub async fn design_active(Extension(state): Extension<AppState>) -> ApiResult<DesignSystem> {
    let design = state
        .stores
        .design
        .get_active()
        .await?
        .ok_or_else(|| ApiError::not_found("No active design system found"))?;
    Ok(ApiResponse::success(design))
}

/// GET /api/v1/design/by-name/:name
pub async fn design_get_by_name(
    Extension(state): Extension<AppState>,
    PathParam(name): PathParam<String>,
) -> ApiResult<DesignSystem> {
    let design = state
        .stores
        .design
        .get_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(design))
}

/// GET /api/v1/design/:id
pub async fn design_get(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<DesignSystem> {
    let design = state
        .stores
        .design
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(design))
}

/// PUT /api/v1/design/:id - partial update; each supplied section is replaced whole
pub async fn design_update(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<i64>,
    ValidJson(patch): ValidJson<DesignSystemUpdate>,
) -> ApiResult<DesignSystem> {
    let design = state
        .stores
        .design
        .update(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(design))
}

/// POST /api/v1/design/:id/activate
pub async fn design_activate(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<DesignSystem> {
    let design = state
        .stores
        .design
        .set_active(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    info!("Activated design system {} '{}'", design.id, design.name);
    Ok(ApiResponse::success(design))
}

/// DELETE /api/v1/design/:id - refused for the active record
pub async fn design_delete(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<()> {
    match state.stores.design.delete(id).await? {
        DeleteOutcome::Deleted => Ok(ApiResponse::no_content()),
        DeleteOutcome::Active => Err(ApiError::conflict(
            "Cannot delete the active design system",
        )),
        DeleteOutcome::NotFound => Err(ApiError::conflict(
            "Cannot delete design system: not found",
        )),
    }
}
