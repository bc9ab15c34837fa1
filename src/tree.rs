//! Flat node map to ordered display tree.
//!
//! The orchestrator injects synthetic step-group nodes (named `[0]`, `[1]`,
//! ...) that carry no display meaning. Building the tree elides them and
//! splices their children into the parent's position, preserving the
//! original child order throughout.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{DisplayNode, NodeGraph};

/// A name consisting of exactly one non-negative integer in square
/// brackets marks a synthetic step-group node.
fn is_step_group(display_name: &str) -> bool {
    static STEP_GROUP: OnceLock<Regex> = OnceLock::new();
    STEP_GROUP
        .get_or_init(|| Regex::new(r"^\[\d+\]$").expect("step-group pattern is valid"))
        .is_match(display_name)
}

/// Build the visible children of `root_id` as a nested display tree.
///
/// Child ids absent from the map are skipped. A child id already on the
/// current recursion path (the graph is untrusted and may be cyclic) is
/// dropped, which bounds the traversal at one visit per node per path.
pub fn build_tree(graph: &NodeGraph, root_id: &str) -> Vec<DisplayNode> {
    let mut path = HashSet::new();
    path.insert(root_id.to_string());
    visible_children(graph, root_id, &mut path)
}

fn visible_children(
    graph: &NodeGraph,
    id: &str,
    path: &mut HashSet<String>,
) -> Vec<DisplayNode> {
    let Some(node) = graph.get(id) else {
        return Vec::new();
    };

    let mut tree = Vec::new();
    for child_id in &node.children {
        let Some(child) = graph.get(child_id) else {
            continue;
        };
        if !path.insert(child_id.clone()) {
            // back-edge: drop the repeated subtree
            continue;
        }

        let display_name = child.display_name_or(child_id);
        if is_step_group(display_name) {
            tree.extend(visible_children(graph, child_id, path));
        } else {
            tree.push(DisplayNode {
                name: display_name.to_string(),
                status: child.phase_or_unknown().to_string(),
                node_type: child.type_or_unknown().to_string(),
                children: visible_children(graph, child_id, path),
            });
        }

        path.remove(child_id);
    }
    tree
}
