//! Display-side response types.
//!
//! Field names here are the wire contract consumed by the visualization
//! page; display names are not unique and no node ids are carried.

use serde::Serialize;

/// One node of the nested, display-ready execution tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayNode {
    pub name: String,
    pub status: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub children: Vec<DisplayNode>,
}

/// Summary response for a single workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    /// ISO-8601 start timestamp, or the literal `"N/A"`.
    pub start_time: String,
    /// Elapsed `H:MM:SS` string, or the literal `"In Progress"`.
    pub duration: String,
    /// Root-level children of the execution tree.
    pub nodes: Vec<DisplayNode>,
}

/// One row of the workflow list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowListEntry {
    pub name: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_node_wire_keys() {
        let node = DisplayNode {
            name: "step-a".to_string(),
            status: "Succeeded".to_string(),
            node_type: "Pod".to_string(),
            children: vec![],
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({ "name": "step-a", "status": "Succeeded", "type": "Pod", "children": [] })
        );
    }

    #[test]
    fn test_summary_wire_keys() {
        let summary = WorkflowSummary {
            start_time: "N/A".to_string(),
            duration: "In Progress".to_string(),
            nodes: vec![],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({ "startTime": "N/A", "duration": "In Progress", "nodes": [] })
        );
    }
}
