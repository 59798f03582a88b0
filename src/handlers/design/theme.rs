// handlers/design/theme.rs - derived stylesheet and palette endpoints
use axum::Extension;
use serde::Deserialize;

use crate::database::models::DesignSystemConfig;
use crate::design::{palette, render_css_variables, Palette};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CssResponse, QueryParams};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PaletteQuery {
    pub primary: Option<String>,
}

async fn current_config(state: &AppState) -> Result<DesignSystemConfig, ApiError> {
    Ok(match state.stores.design.get_active().await? {
        Some(design) => design.config,
        None => state.fallback_design.as_ref().clone(),
    })
}

/// GET /api/v1/design/css - CSS custom properties for the active design system
pub async fn design_css(Extension(state): Extension<AppState>) -> Result<CssResponse, ApiError> {
    let config = current_config(&state).await?;
    Ok(CssResponse(render_css_variables(&config)))
}

/// GET /api/v1/design/palette - light/dark/complementary variants of a primary color
pub async fn design_palette(
    Extension(state): Extension<AppState>,
    QueryParams(query): QueryParams<PaletteQuery>,
) -> ApiResult<Palette> {
    let primary = match query.primary {
        Some(primary) => primary,
        None => current_config(&state).await?.colors.primary,
    };
    Ok(ApiResponse::success(palette(&primary)?))
}
