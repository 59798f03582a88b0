// handlers/contact.rs - POST /api/v1/contact handler
use axum::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::services::ContactMessage;
use crate::state::AppState;

/// POST /api/v1/contact - relay a visitor message to the contact form
pub async fn contact_post(
    Extension(state): Extension<AppState>,
    ValidJson(message): ValidJson<ContactMessage>,
) -> ApiResult<Value> {
    state.contact.send(&message).await?;
    Ok(ApiResponse::success(json!({ "status": "success" })))
}
