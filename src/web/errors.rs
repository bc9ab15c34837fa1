//! Web API error type and its HTTP response conversion.
//!
//! The single place where internal conditions become status codes and
//! `{"error": <message>}` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::LensError;

const INTERNAL_MESSAGE: &str = "An internal server error occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("Kubernetes API error: {0}")]
    ControlPlane(String),
    #[error("An internal server error occurred.")]
    Internal,
}

impl From<LensError> for ApiError {
    fn from(err: LensError) -> Self {
        match err {
            LensError::MalformedGraph(_) => {
                ApiError::NotFound("Workflow status or nodes not available.".to_string())
            }
            LensError::NotFound(name) => ApiError::NotFound(format!("Workflow '{name}' not found.")),
            LensError::ControlPlane(reason) => ApiError::ControlPlane(reason),
            LensError::TimeParse(detail)
            | LensError::Configuration(detail)
            | LensError::Internal(detail) => {
                // detail stays server-side; the body is generic
                error!(error = %detail, "internal error while serving request");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::ControlPlane(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Kubernetes API error: {reason}"),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
