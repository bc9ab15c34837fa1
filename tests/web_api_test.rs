//! # Web API Integration Tests
//!
//! Spins up the real axum application on an ephemeral port with a stubbed
//! control plane and drives it over HTTP, asserting status codes and body
//! shapes for the success and failure paths.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use argo_lens::config::AppConfig;
use argo_lens::error::{LensError, Result as LensResult};
use argo_lens::kube::ControlPlane;
use argo_lens::service::WorkflowService;
use argo_lens::web::{create_app, state::AppState};

/// Control plane standing in for the Kubernetes API: serves workflow
/// documents out of a canned collection, or fails every call.
struct StubControlPlane {
    collection: LensResult<Value>,
}

impl StubControlPlane {
    fn serving(items: Vec<Value>) -> Self {
        Self {
            collection: Ok(json!({ "items": items })),
        }
    }

    fn failing(error: LensError) -> Self {
        Self {
            collection: Err(error),
        }
    }
}

#[async_trait]
impl ControlPlane for StubControlPlane {
    async fn get_workflow(&self, name: &str) -> LensResult<Value> {
        let collection = self.collection.clone()?;
        collection
            .get("items")
            .and_then(Value::as_array)
            .and_then(|items| {
                items
                    .iter()
                    .find(|item| item.pointer("/metadata/name").and_then(Value::as_str) == Some(name))
            })
            .cloned()
            .ok_or_else(|| LensError::NotFound(name.to_string()))
    }

    async fn list_workflows(&self) -> LensResult<Value> {
        self.collection.clone()
    }
}

/// Start the app on a dynamic port and return its base URL.
async fn spawn_server(stub: StubControlPlane) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let service = WorkflowService::new(Arc::new(stub));
    let app = create_app(AppState::new(service, AppConfig::default()));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

fn completed_workflow() -> Value {
    json!({
        "metadata": { "name": "pipeline" },
        "status": {
            "phase": "Succeeded",
            "startedAt": "2024-01-01T00:00:00Z",
            "finishedAt": "2024-01-01T01:30:00Z",
            "nodes": {
                "pipeline": { "displayName": "pipeline", "type": "Steps", "children": ["pipeline-g0"] },
                "pipeline-g0": { "displayName": "[0]", "type": "StepGroup", "children": ["pipeline-a", "pipeline-b"] },
                "pipeline-a": { "displayName": "build", "phase": "Succeeded", "type": "Pod" },
                "pipeline-b": { "displayName": "test", "phase": "Succeeded", "type": "Pod" }
            }
        }
    })
}

#[tokio::test]
async fn test_list_workflows_returns_name_status_pairs() {
    let base = spawn_server(StubControlPlane::serving(vec![
        completed_workflow(),
        json!({ "metadata": { "name": "fresh" } }),
    ]))
    .await;

    let response = reqwest::get(format!("{base}/api/workflows")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            { "name": "pipeline", "status": "Succeeded" },
            { "name": "fresh", "status": "Pending" }
        ])
    );
}

#[tokio::test]
async fn test_get_workflow_returns_summary_with_spliced_tree() {
    let base = spawn_server(StubControlPlane::serving(vec![completed_workflow()])).await;

    let response = reqwest::get(format!("{base}/api/workflow/pipeline"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["startTime"], "2024-01-01T00:00:00Z");
    assert_eq!(body["duration"], "1:30:00");

    // the [0] step group never appears; its children are root-level
    let names: Vec<&str> = body["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["build", "test"]);
}

#[tokio::test]
async fn test_get_unknown_workflow_is_404_with_error_body() {
    let base = spawn_server(StubControlPlane::serving(vec![])).await;

    let response = reqwest::get(format!("{base}/api/workflow/ghost"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_workflow_without_status_is_404() {
    let base = spawn_server(StubControlPlane::serving(vec![json!({
        "metadata": { "name": "fresh" }
    })]))
    .await;

    let response = reqwest::get(format!("{base}/api/workflow/fresh"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Workflow status or nodes not available.");
}

#[tokio::test]
async fn test_control_plane_failure_is_500_with_reason() {
    let base = spawn_server(StubControlPlane::failing(LensError::ControlPlane(
        "Unauthorized".to_string(),
    )))
    .await;

    let response = reqwest::get(format!("{base}/api/workflows")).await.unwrap();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Kubernetes API error: Unauthorized");
}

#[tokio::test]
async fn test_bad_timestamps_are_500_with_generic_body() {
    let base = spawn_server(StubControlPlane::serving(vec![json!({
        "metadata": { "name": "wf" },
        "status": {
            "startedAt": "garbage",
            "finishedAt": "2024-01-01T01:30:00Z",
            "nodes": { "wf": {} }
        }
    })]))
    .await;

    let response = reqwest::get(format!("{base}/api/workflow/wf")).await.unwrap();
    assert_eq!(response.status(), 500);

    // the parse detail must not leak into the body
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "An internal server error occurred.");
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = spawn_server(StubControlPlane::serving(vec![])).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
