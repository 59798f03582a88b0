// handlers/experiences/collection.rs - GET/POST /api/v1/experiences handlers
use axum::Extension;
use tracing::info;

use crate::database::models::{Experience, ExperienceCreate};
use crate::middleware::{ApiResponse, ApiResult, QueryParams, ValidJson};
use crate::state::AppState;
use crate::types::ListQuery;

/// GET /api/v1/experiences - list experiences ordered by id
pub async fn experiences_list(
    Extension(state): Extension<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Vec<Experience>> {
    let experiences = state.stores.experiences.list(query.page(&state.api)).await?;
    Ok(ApiResponse::success(experiences))
}

/// POST /api/v1/experiences
pub async fn experience_create(
    Extension(state): Extension<AppState>,
    ValidJson(input): ValidJson<ExperienceCreate>,
) -> ApiResult<Experience> {
    let experience = state.stores.experiences.create(input).await?;
    info!("Created experience '{}' at {}", experience.id, experience.company);
    Ok(ApiResponse::created(experience))
}
