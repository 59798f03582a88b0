use std::sync::Arc;

use crate::config::ApiConfig;
use crate::database::models::DesignSystemConfig;
use crate::database::Stores;
use crate::services::ContactRelay;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    /// Served when no design system is active
    pub fallback_design: Arc<DesignSystemConfig>,
    pub api: ApiConfig,
    pub contact: ContactRelay,
}

impl AppState {
    pub fn new(
        stores: Stores,
        fallback_design: DesignSystemConfig,
        api: ApiConfig,
        contact: ContactRelay,
    ) -> Self {
        Self {
            stores,
            fallback_design: Arc::new(fallback_design),
            api,
            contact,
        }
    }
}
