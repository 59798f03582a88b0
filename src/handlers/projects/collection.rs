// handlers/projects/collection.rs - GET/POST /api/v1/projects handlers
use axum::Extension;
use tracing::info;

use crate::database::models::{Project, ProjectCreate};
use crate::middleware::{ApiResponse, ApiResult, QueryParams, ValidJson};
use crate::state::AppState;
use crate::types::ListQuery;

/// GET /api/v1/projects - list projects ordered by id
pub async fn projects_list(
    Extension(state): Extension<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Vec<Project>> {
    let projects = state.stores.projects.list(query.page(&state.api)).await?;
    Ok(ApiResponse::success(projects))
}

/// POST /api/v1/projects - create a project under a caller-chosen id
pub async fn project_create(
    Extension(state): Extension<AppState>,
    ValidJson(input): ValidJson<ProjectCreate>,
) -> ApiResult<Project> {
    let project = state.stores.projects.create(input).await?;
    info!("Created project '{}'", project.id);
    Ok(ApiResponse::created(project))
}
