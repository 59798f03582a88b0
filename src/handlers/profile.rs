// handlers/profile.rs - GET/POST/PUT /api/v1/profile handlers
use axum::Extension;

use crate::database::models::{Profile, ProfileCreate, ProfileUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::state::AppState;

const NOT_FOUND: &str = "Profile not found";

/// GET /api/v1/profile
pub async fn profile_get(Extension(state): Extension<AppState>) -> ApiResult<Profile> {
    let profile = state
        .stores
        .profile
        .get()
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(profile))
}

/// POST /api/v1/profile - create the single profile row
pub async fn profile_create(
    Extension(state): Extension<AppState>,
    ValidJson(input): ValidJson<ProfileCreate>,
) -> ApiResult<Profile> {
    let profile = state.stores.profile.create(input).await?;
    Ok(ApiResponse::created(profile))
}

/// PUT /api/v1/profile - partial update
pub async fn profile_update(
    Extension(state): Extension<AppState>,
    ValidJson(patch): ValidJson<ProfileUpdate>,
) -> ApiResult<Profile> {
    let profile = state
        .stores
        .profile
        .update(patch)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(profile))
}
