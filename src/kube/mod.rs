//! Kubernetes control-plane access.
//!
//! The viewer consumes exactly two read operations against the Workflow
//! custom-resource API, behind the [`ControlPlane`] trait so the query
//! service never sees HTTP. Credential resolution lives in [`settings`]
//! and is performed once at startup; the resolved client is injected as a
//! constructor dependency.

pub mod client;
pub mod settings;

pub use client::{ControlPlane, KubeClient};
pub use settings::KubeSettings;
