//! Typed view of the orchestrator's flat execution-graph node map.
//!
//! The control plane reports workflow execution state as a single `nodes`
//! object keyed by node id, with child pointers only (no parent pointers).
//! Documents are schema-on-read: every field here is optional on the wire
//! and unknown fields are ignored, so newer control-plane versions keep
//! parsing.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LensError, Result};

/// One node of the execution graph, as reported by the control plane.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeRecord {
    pub display_name: Option<String>,
    pub phase: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    /// Ordered child id references; insertion order is the display order.
    pub children: Vec<String>,
}

impl NodeRecord {
    /// Effective display name, falling back to the node's own id.
    pub fn display_name_or<'a>(&'a self, id: &'a str) -> &'a str {
        self.display_name.as_deref().unwrap_or(id)
    }

    pub fn phase_or_unknown(&self) -> &str {
        self.phase.as_deref().unwrap_or("Unknown")
    }

    pub fn type_or_unknown(&self) -> &str {
        self.node_type.as_deref().unwrap_or("Unknown")
    }
}

/// Flat node map keyed by node id, plus the designated root id.
///
/// The source is untrusted external data: child ids may dangle and the
/// graph may even be cyclic. Consumers tolerate both; this type only
/// guarantees that the map itself was present.
#[derive(Debug, Clone)]
pub struct NodeGraph {
    nodes: HashMap<String, NodeRecord>,
    root_id: String,
}

impl NodeGraph {
    /// Parse the `nodes` map out of a workflow `status` document.
    ///
    /// Fails only when the node map is absent or not an object. Individual
    /// node values that do not deserialize degrade to an all-default record
    /// rather than failing the whole graph.
    pub fn from_status(status: &Value, root_id: impl Into<String>) -> Result<Self> {
        let raw_nodes = status
            .get("nodes")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                LensError::MalformedGraph("workflow status carries no node map".to_string())
            })?;

        let nodes = raw_nodes
            .iter()
            .map(|(id, value)| {
                let record = serde_json::from_value(value.clone()).unwrap_or_default();
                (id.clone(), record)
            })
            .collect();

        Ok(Self {
            nodes,
            root_id: root_id.into(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
