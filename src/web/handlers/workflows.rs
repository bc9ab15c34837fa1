//! # Workflow Read Handlers
//!
//! HTTP handlers over the workflow query service. Handlers propagate
//! `LensError` via `?`; the `ApiError` conversion owns the status mapping.

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::models::{WorkflowListEntry, WorkflowSummary};
use crate::web::errors::ApiResult;
use crate::web::state::AppState;

/// List workflows: GET /api/workflows
///
/// Returns a bare JSON array of `{name, status}` entries for the
/// configured namespace.
pub async fn list_workflows(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WorkflowListEntry>>> {
    debug!(namespace = %state.config.namespace, "listing workflows");

    let entries = state.service.list_workflows().await?;
    Ok(Json(entries))
}

/// Workflow detail: GET /api/workflow/{name}
///
/// Returns `{startTime, duration, nodes}` with the nested execution tree.
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<WorkflowSummary>> {
    debug!(workflow = %name, "building workflow summary");

    let summary = state.service.workflow_summary(&name).await?;
    Ok(Json(summary))
}
