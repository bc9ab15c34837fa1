//! Data model for the viewer: the control plane's flat node map on the way
//! in, display-ready trees and summaries on the way out.

pub mod display;
pub mod node;

pub use display::{DisplayNode, WorkflowListEntry, WorkflowSummary};
pub use node::{NodeGraph, NodeRecord};
