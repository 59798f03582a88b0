// handlers/projects/record.rs - GET/PUT/DELETE /api/v1/projects/:id handlers
use axum::Extension;

use crate::database::models::{Project, ProjectUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, PathParam, ValidJson};
use crate::state::AppState;

fn not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("Project '{}' not found", id))
}

/// GET /api/v1/projects/:id
pub async fn project_get(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<String>,
) -> ApiResult<Project> {
    let project = state
        .stores
        .projects
        .get(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(ApiResponse::success(project))
}

/// PUT /api/v1/projects/:id - only supplied fields change
pub async fn project_update(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<String>,
    ValidJson(patch): ValidJson<ProjectUpdate>,
) -> ApiResult<Project> {
    let project = state
        .stores
        .projects
        .update(&id, patch)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(ApiResponse::success(project))
}

/// DELETE /api/v1/projects/:id
pub async fn project_delete(
    Extension(state): Extension<AppState>,
    PathParam(id): PathParam<String>,
) -> ApiResult<()> {
    if !state.stores.projects.delete(&id).await? {
        return Err(not_found(&id));
    }
    Ok(ApiResponse::no_content())
}
