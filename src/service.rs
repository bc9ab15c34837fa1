//! Workflow query orchestration: fetch, shape, summarize.
//!
//! The only component that talks to the control plane. Everything it hands
//! to the tree builder and status projector is request-local data; nothing
//! is cached or mutated across requests.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{LensError, Result};
use crate::kube::ControlPlane;
use crate::models::{NodeGraph, WorkflowListEntry, WorkflowSummary};
use crate::status;
use crate::tree;

/// Status shown in the list view for workflows the controller has not
/// phased yet. Deliberately distinct from the tree-node default "Unknown".
const LIST_DEFAULT_PHASE: &str = "Pending";

pub struct WorkflowService {
    control_plane: Arc<dyn ControlPlane>,
}

impl WorkflowService {
    pub fn new(control_plane: Arc<dyn ControlPlane>) -> Self {
        Self { control_plane }
    }

    /// Name/status pairs for every workflow in the namespace.
    pub async fn list_workflows(&self) -> Result<Vec<WorkflowListEntry>> {
        let collection = self.control_plane.list_workflows().await?;

        let entries: Vec<WorkflowListEntry> = collection
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(list_entry).collect())
            .unwrap_or_default();

        debug!(count = entries.len(), "listed workflows");
        Ok(entries)
    }

    /// Full display summary for one workflow: timing plus the nested
    /// execution tree rooted at the workflow's own name.
    pub async fn workflow_summary(&self, name: &str) -> Result<WorkflowSummary> {
        let workflow = self.control_plane.get_workflow(name).await?;

        let status = workflow.get("status").ok_or_else(|| {
            LensError::MalformedGraph("workflow has no status document".to_string())
        })?;

        let root_id = workflow
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .unwrap_or(name);

        let graph = NodeGraph::from_status(status, root_id)?;
        let timing = status::project_timing(status)?;
        let nodes = tree::build_tree(&graph, graph.root_id());

        debug!(
            workflow = %root_id,
            graph_nodes = graph.len(),
            visible_roots = nodes.len(),
            "built workflow summary"
        );

        Ok(WorkflowSummary {
            start_time: timing.start_time,
            duration: timing.duration,
            nodes,
        })
    }
}

fn list_entry(item: &Value) -> WorkflowListEntry {
    WorkflowListEntry {
        name: item
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        status: item
            .pointer("/status/phase")
            .and_then(Value::as_str)
            .unwrap_or(LIST_DEFAULT_PHASE)
            .to_string(),
    }
}
