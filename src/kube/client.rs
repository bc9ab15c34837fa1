//! Raw read access to Workflow custom resources.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Certificate, Client, Identity, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{LensError, Result};
use crate::kube::settings::KubeSettings;

/// Group/version/plural of the Argo Workflow custom resource.
pub const ARGO_GROUP: &str = "argoproj.io";
pub const ARGO_VERSION: &str = "v1alpha1";
pub const ARGO_PLURAL: &str = "workflows";

/// Read operations the query service needs from the control plane.
///
/// Both return the loosely-typed workflow document as raw JSON; shaping is
/// the query service's job.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Fetch one workflow document by name.
    async fn get_workflow(&self, name: &str) -> Result<Value>;

    /// List the workflow documents in the configured namespace.
    async fn list_workflows(&self) -> Result<Value>;
}

/// reqwest-backed client for the Kubernetes custom-objects API.
pub struct KubeClient {
    http: Client,
    server: String,
    namespace: String,
}

impl KubeClient {
    pub fn new(settings: &KubeSettings, namespace: impl Into<String>) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(ca) = &settings.ca_bundle {
            let certificate = Certificate::from_pem(ca).map_err(|e| {
                LensError::Configuration(format!("invalid control plane CA bundle: {e}"))
            })?;
            builder = builder.add_root_certificate(certificate);
        }
        if let Some(identity) = &settings.client_identity {
            let identity = Identity::from_pem(identity).map_err(|e| {
                LensError::Configuration(format!("invalid client certificate identity: {e}"))
            })?;
            builder = builder.identity(identity);
        }
        if settings.insecure_skip_tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(token) = &settings.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| LensError::Configuration(format!("invalid bearer token: {e}")))?;
            value.set_sensitive(true);
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let http = builder.build().map_err(|e| {
            LensError::Configuration(format!("control plane HTTP client unbuildable: {e}"))
        })?;

        Ok(Self {
            http,
            server: settings.server.clone(),
            namespace: namespace.into(),
        })
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/apis/{}/{}/namespaces/{}/{}",
            self.server, ARGO_GROUP, ARGO_VERSION, self.namespace, ARGO_PLURAL
        )
    }

    async fn get_json(&self, url: &str, subject: &str) -> Result<Value> {
        debug!(url = %url, "querying control plane");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(LensError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            return Err(LensError::ControlPlane(failure_reason(status, response).await));
        }

        Ok(response.json().await?)
    }
}

/// Prefer the API server's own `message` field as the reason string.
async fn failure_reason(status: StatusCode, response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from));

    match message {
        Some(message) => message,
        None => format!("{status}"),
    }
}

#[async_trait]
impl ControlPlane for KubeClient {
    async fn get_workflow(&self, name: &str) -> Result<Value> {
        let url = format!("{}/{}", self.collection_url(), name);
        self.get_json(&url, name).await
    }

    async fn list_workflows(&self) -> Result<Value> {
        self.get_json(&self.collection_url(), ARGO_PLURAL).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(server: &str) -> KubeSettings {
        KubeSettings {
            server: server.to_string(),
            token: None,
            ca_bundle: None,
            client_identity: None,
            insecure_skip_tls_verify: false,
        }
    }

    #[test]
    fn test_collection_url_shape() {
        let client = KubeClient::new(&settings("https://k8s.example.com:6443"), "argo").unwrap();
        assert_eq!(
            client.collection_url(),
            "https://k8s.example.com:6443/apis/argoproj.io/v1alpha1/namespaces/argo/workflows"
        );
    }

    #[test]
    fn test_invalid_ca_bundle_rejected_at_build() {
        let mut bad = settings("https://localhost:6443");
        bad.ca_bundle = Some(b"not a pem".to_vec());
        assert!(matches!(
            KubeClient::new(&bad, "argo"),
            Err(LensError::Configuration(_))
        ));
    }
}
