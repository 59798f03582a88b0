// handlers/data/record.rs - GET/PUT/DELETE /api/v1/data/:id handlers
use axum::Extension;

use crate::database::models::{DynamicData, DynamicDataUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, PathParam, ValidJson};
use crate::state::AppState;

fn not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Data item {} not found", id))
}

/// GET /api/v1/data/:id
pub async fn data_get(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<DynamicData> {
    let item = state
        .stores
        .data
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::success(item))
}

/// PUT /api/v1/data/:id - a supplied `tags` list replaces the whole tag set
pub async fn data_update(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<i64>,
    ValidJson(patch): ValidJson<DynamicDataUpdate>,
) -> ApiResult<DynamicData> {
    let item = state
        .stores
        .data
        .update(id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/v1/data/:id
pub async fn data_delete(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<()> {
    if !state.stores.data.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(ApiResponse::no_content())
}
