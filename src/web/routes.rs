//! # Web API Route Definitions
//!
//! Route structure for the viewer API.

use axum::routing::get;
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Workflow read API, mounted under `/api`:
/// - `/workflows` - name/status summary of every workflow
/// - `/workflow/:name` - nested execution tree for one workflow
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/workflows", get(handlers::workflows::list_workflows))
        .route("/workflow/:name", get(handlers::workflows::get_workflow))
}

/// Health endpoint for probes and load balancers.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::basic_health))
}
