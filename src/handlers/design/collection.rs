// handlers/design/collection.rs - GET/POST /api/v1/design handlers
use axum::Extension;
use tracing::info;

use crate::database::models::{DesignSystem, DesignSystemCreate};
use crate::middleware::{ApiResponse, ApiResult, QueryParams, ValidJson};
use crate::state::AppState;
use crate::types::ListQuery;

/// GET /api/v1/design - list design systems ordered by id
pub async fn design_list(
    Extension(state): Extension<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Vec<DesignSystem>> {
    let designs = state.stores.design.list(query.page(&state.api)).await?;
    Ok(ApiResponse::success(designs))
}

/// POST /api/v1/design - create a design system
///
/// The first design system created while none is active becomes active.
pub async fn design_create(
    Extension(state): Extension<AppState>,
    ValidJson(input): ValidJson<DesignSystemCreate>,
) -> ApiResult<DesignSystem> {
    let design = state.stores.design.create(input).await?;
    info!(
        "Created design system {} '{}' (active: {})",
        design.id, design.name, design.is_active
    );
    Ok(ApiResponse::created(design))
}
