// handlers/portfolio.rs - GET /api/v1/portfolio handler
use axum::Extension;
use serde::Serialize;

use crate::database::models::{Experience, Project};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::PageRequest;

#[derive(Debug, Serialize)]
pub struct Portfolio {
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
}

/// GET /api/v1/portfolio - experiences and projects in one response
pub async fn portfolio_get(Extension(state): Extension<AppState>) -> ApiResult<Portfolio> {
    let page = PageRequest::new(0, state.api.default_page_size);
    let (experiences, projects) = futures::try_join!(
        state.stores.experiences.list(page),
        state.stores.projects.list(page),
    )?;
    Ok(ApiResponse::success(Portfolio {
        experiences,
        projects,
    }))
}
