// handlers/experiences/record.rs - GET/PUT/DELETE /api/v1/experiences/:id handlers
use axum::Extension;

use crate::database::models::{Experience, ExperienceUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, PathParam, ValidJson};
use crate::state::AppState;

fn not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("Experience '{}' not found", id))
}

/// GET /api/v1/experiences/:id
pub async fn experience_get(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<String>,
) -> ApiResult<Experience> {
    let experience = state
        .stores
        .experiences
        .get(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(ApiResponse::success(experience))
}

/// PUT /api/v1/experiences/:id
pub async fn experience_update(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<String>,
    ValidJson(patch): ValidJson<ExperienceUpdate>,
) -> ApiResult<Experience> {
    let experience = state
        .stores
        .experiences
        .update(&id, patch)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(ApiResponse::success(experience))
}

/// DELETE /api/v1/experiences/:id
pub async fn experience_delete(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<String>,
) -> ApiResult<()> {
    if !state.stores.experiences.delete(&id).await? {
        return Err(not_found(&id));
    }
    Ok(ApiResponse::no_content())
}
