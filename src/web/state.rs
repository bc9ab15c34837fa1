//! Shared application state for the web API.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::service::WorkflowService;

/// State shared across all request handlers: the query service (holding the
/// injected control-plane client) and the process configuration. Both are
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkflowService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service: WorkflowService, config: AppConfig) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}
