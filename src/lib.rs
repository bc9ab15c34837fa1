//! # Argo Lens
//!
//! Read-only web view of Argo Workflow execution state. The service fetches
//! a workflow's status document from the Kubernetes control plane and
//! renders its flat, child-pointer-indexed node map as an ordered nested
//! tree, eliding the synthetic step-group nodes the orchestrator injects.
//!
//! ## Module Organization
//!
//! - [`models`] - Node graph input types and display-ready output types
//! - [`tree`] - Flat map to nested tree transformation
//! - [`status`] - Start time and duration projection
//! - [`kube`] - Control-plane credentials and raw Workflow API access
//! - [`service`] - Query orchestration over the control plane
//! - [`web`] - Axum routes, handlers, and HTTP error mapping
//! - [`config`] - Process configuration
//! - [`error`] - Structured error handling
//!
//! Requests are fully isolated: every response is computed fresh from a
//! single fetch, with no caching or cross-request state.

pub mod config;
pub mod error;
pub mod kube;
pub mod logging;
pub mod models;
pub mod service;
pub mod status;
pub mod tree;
pub mod web;

pub use config::AppConfig;
pub use error::{LensError, Result};
pub use service::WorkflowService;
