// handlers/design/color_scheme.rs - GET/PUT /api/v1/design/color-scheme handlers
use axum::Extension;

use crate::database::models::ColorScheme;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::state::AppState;

/// GET /api/v1/design/color-scheme - colors of the active design system,
/// or the fallback colors when none is active
pub async fn color_scheme_get(Extension(state): Extension<AppState>) -> ApiResult<ColorScheme> {
    let colors = match state.stores.design.get_active().await? {
        Some(design) => design.config.colors,
        None => state.fallback_design.colors.clone(),
    };
    Ok(ApiResponse::success(colors))
}

/// PUT /api/v1/design/color-scheme - replace the active record's colors
pub async fn color_scheme_put(
    Extension(state): Extension<AppState>,
    ValidJson(colors): ValidJson<ColorScheme>,
) -> ApiResult<ColorScheme> {
    let colors = state
        .stores
        .design
        .update_active_colors(colors)
        .await?
        .ok_or_else(|| ApiError::not_found("No active design system found"))?;
    Ok(ApiResponse::success(colors))
}
