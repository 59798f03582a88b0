// handlers/data/collection.rs - GET/POST /api/v1/data handlers
use axum::Extension;
use serde::Deserialize;
use tracing::info;

use crate::database::models::{DynamicData, DynamicDataCreate};
use crate::middleware::{ApiResponse, ApiResult, QueryParams, ValidJson};
use crate::state::AppState;
use crate::types::{Page, PageRequest};

#[derive(Debug, Default, Deserialize)]
pub struct DataListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    /// Only items carrying this tag name
    pub tag: Option<String>,
}

/// GET /api/v1/data - paginated list, optionally filtered by tag
pub async fn data_list(
    Extension(state): Extension<AppState>,
    QueryParams(query): QueryParams<DataListQuery>,
) -> ApiResult<Page<DynamicData>> {
    let page = PageRequest::resolve(query.skip, query.limit, &state.api);
    let result = state.stores.data.list(page, query.tag.as_deref()).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/data - create an item; unknown tag names are created
pub async fn data_create(
    Extension(state): Extension<AppState>,
    ValidJson(input): ValidJson<DynamicDataCreate>,
) -> ApiResult<DynamicData> {
    let item = state.stores.data.create(input).await?;
    info!("Created data item {} with {} tag(s)", item.id, item.tags.len());
    Ok(ApiResponse::created(item))
}
