//! Error types for the Argo Lens service.

use thiserror::Error;

/// Failure conditions across the service.
///
/// The web layer owns the mapping from these conditions to HTTP responses;
/// everything below it reports through this enum and never touches status
/// codes directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LensError {
    /// The fetched workflow document carries no usable node map.
    #[error("Workflow status or nodes not available: {0}")]
    MalformedGraph(String),
    /// The control plane has no workflow under the requested name.
    #[error("Workflow not found: {0}")]
    NotFound(String),
    /// A timestamp was present in the status document but unparseable.
    #[error("Timestamp parse error: {0}")]
    TimeParse(String),
    /// The control plane rejected or failed the query.
    #[error("Kubernetes API error: {0}")]
    ControlPlane(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for LensError {
    fn from(error: serde_json::Error) -> Self {
        LensError::Internal(format!("JSON serialization error: {error}"))
    }
}

impl From<reqwest::Error> for LensError {
    fn from(error: reqwest::Error) -> Self {
        LensError::ControlPlane(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LensError>;
