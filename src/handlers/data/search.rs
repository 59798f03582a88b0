// handlers/data/search.rs - GET /api/v1/data/search handler
use axum::Extension;
use serde::Deserialize;

use crate::database::models::DynamicData;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, QueryParams};
use crate::state::AppState;
use crate::types::{Page, PageRequest};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /api/v1/data/search?q= - case-insensitive match on title or description
pub async fn data_search(
    Extension(state): Extension<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> ApiResult<Page<DynamicData>> {
    let q = query
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::field_error("q", "Search query must not be empty"))?;

    let page = PageRequest::resolve(query.skip, query.limit, &state.api);
    let result = state.stores.data.search(&q, page).await?;
    Ok(ApiResponse::success(result))
}
