//! Control-plane credential resolution.
//!
//! Attempted in fixed fallback order: in-cluster service-account
//! credentials first, then the local kubeconfig (`$KUBECONFIG` or
//! `~/.kube/config`).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{LensError, Result};

const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// Resolved connection settings for the Kubernetes API server.
#[derive(Debug, Clone)]
pub struct KubeSettings {
    /// Base URL of the API server, e.g. `https://10.0.0.1:443`.
    pub server: String,
    /// Bearer token, when the credential source provides one.
    pub token: Option<String>,
    /// PEM-encoded CA bundle to trust for the server connection.
    pub ca_bundle: Option<Vec<u8>>,
    /// PEM-encoded client certificate + key for mTLS user entries.
    pub client_identity: Option<Vec<u8>>,
    pub insecure_skip_tls_verify: bool,
}

impl KubeSettings {
    /// Resolve credentials: in-cluster first, kubeconfig as fallback.
    pub fn resolve() -> Result<Self> {
        match Self::in_cluster() {
            Ok(settings) => {
                info!(server = %settings.server, "Using in-cluster control plane credentials");
                Ok(settings)
            }
            Err(e) => {
                debug!(error = %e, "In-cluster credentials unavailable, falling back to kubeconfig");
                let settings = Self::from_kubeconfig()?;
                info!(server = %settings.server, "Using kubeconfig control plane credentials");
                Ok(settings)
            }
        }
    }

    /// Service-account credentials mounted into every pod.
    pub fn in_cluster() -> Result<Self> {
        let host = env::var("KUBERNETES_SERVICE_HOST").map_err(|_| {
            LensError::Configuration("KUBERNETES_SERVICE_HOST not set".to_string())
        })?;
        let port = env::var("KUBERNETES_SERVICE_PORT").map_err(|_| {
            LensError::Configuration("KUBERNETES_SERVICE_PORT not set".to_string())
        })?;

        let sa_dir = Path::new(SERVICE_ACCOUNT_DIR);
        let token = fs::read_to_string(sa_dir.join("token")).map_err(|e| {
            LensError::Configuration(format!("service account token unreadable: {e}"))
        })?;
        let ca_bundle = fs::read(sa_dir.join("ca.crt")).map_err(|e| {
            LensError::Configuration(format!("service account CA bundle unreadable: {e}"))
        })?;

        Ok(Self {
            server: format!("https://{host}:{port}"),
            token: Some(token.trim().to_string()),
            ca_bundle: Some(ca_bundle),
            client_identity: None,
            insecure_skip_tls_verify: false,
        })
    }

    /// Credentials from the local kubeconfig file.
    pub fn from_kubeconfig() -> Result<Self> {
        Self::from_kubeconfig_file(&default_kubeconfig_path()?)
    }

    /// Parse one kubeconfig file, following its `current-context`.
    pub fn from_kubeconfig_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LensError::Configuration(format!("kubeconfig {} unreadable: {e}", path.display()))
        })?;
        let kubeconfig: Kubeconfig = serde_yaml::from_str(&contents).map_err(|e| {
            LensError::Configuration(format!("kubeconfig {} unparseable: {e}", path.display()))
        })?;

        let context_name = kubeconfig.current_context.clone().ok_or_else(|| {
            LensError::Configuration("kubeconfig has no current-context".to_string())
        })?;
        let context = kubeconfig
            .contexts
            .iter()
            .find(|c| c.name == context_name)
            .map(|c| c.context.clone())
            .ok_or_else(|| {
                LensError::Configuration(format!("kubeconfig context '{context_name}' not found"))
            })?;

        let cluster = kubeconfig
            .clusters
            .iter()
            .find(|c| c.name == context.cluster)
            .map(|c| c.cluster.clone())
            .ok_or_else(|| {
                LensError::Configuration(format!(
                    "kubeconfig cluster '{}' not found",
                    context.cluster
                ))
            })?;

        let user = kubeconfig
            .users
            .iter()
            .find(|u| u.name == context.user)
            .map(|u| u.user.clone())
            .unwrap_or_default();

        let server = cluster.server.ok_or_else(|| {
            LensError::Configuration(format!(
                "kubeconfig cluster '{}' has no server",
                context.cluster
            ))
        })?;

        let ca_bundle = pem_from_inline_or_file(
            cluster.certificate_authority_data.as_deref(),
            cluster.certificate_authority.as_deref(),
        )?;
        let client_identity = client_identity_pem(&user)?;

        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            token: user.token,
            ca_bundle,
            client_identity,
            insecure_skip_tls_verify: cluster.insecure_skip_tls_verify,
        })
    }
}

fn default_kubeconfig_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("KUBECONFIG") {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .ok_or_else(|| LensError::Configuration("home directory unresolvable".to_string()))
}

/// Inline base64 `*-data` fields win over path-valued siblings.
fn pem_from_inline_or_file(data: Option<&str>, path: Option<&str>) -> Result<Option<Vec<u8>>> {
    if let Some(data) = data {
        let decoded = BASE64
            .decode(data.trim())
            .map_err(|e| LensError::Configuration(format!("invalid base64 in kubeconfig: {e}")))?;
        return Ok(Some(decoded));
    }
    if let Some(path) = path {
        let contents = fs::read(path).map_err(|e| {
            LensError::Configuration(format!("kubeconfig-referenced file {path} unreadable: {e}"))
        })?;
        return Ok(Some(contents));
    }
    Ok(None)
}

/// Concatenated cert + key PEM for user entries that authenticate via mTLS.
fn client_identity_pem(user: &User) -> Result<Option<Vec<u8>>> {
    let cert = pem_from_inline_or_file(
        user.client_certificate_data.as_deref(),
        user.client_certificate.as_deref(),
    )?;
    let key = pem_from_inline_or_file(user.client_key_data.as_deref(), user.client_key.as_deref())?;

    match (cert, key) {
        (Some(mut cert), Some(key)) => {
            cert.push(b'\n');
            cert.extend_from_slice(&key);
            Ok(Some(cert))
        }
        (None, None) => Ok(None),
        _ => Err(LensError::Configuration(
            "kubeconfig user has a client certificate without a key (or vice versa)".to_string(),
        )),
    }
}

// Kubeconfig subset this service understands. Unknown fields (preferences,
// extensions, exec plugins) are ignored.

#[derive(Debug, Clone, Deserialize)]
struct Kubeconfig {
    #[serde(rename = "current-context", default)]
    current_context: Option<String>,
    #[serde(default)]
    clusters: Vec<NamedCluster>,
    #[serde(default)]
    contexts: Vec<NamedContext>,
    #[serde(default)]
    users: Vec<NamedUser>,
}

#[derive(Debug, Clone, Deserialize)]
struct NamedCluster {
    name: String,
    cluster: Cluster,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Cluster {
    #[serde(default)]
    server: Option<String>,
    #[serde(rename = "certificate-authority-data", default)]
    certificate_authority_data: Option<String>,
    #[serde(rename = "certificate-authority", default)]
    certificate_authority: Option<String>,
    #[serde(rename = "insecure-skip-tls-verify", default)]
    insecure_skip_tls_verify: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct NamedContext {
    name: String,
    context: Context,
}

#[derive(Debug, Clone, Deserialize)]
struct Context {
    cluster: String,
    user: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NamedUser {
    name: String,
    user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct User {
    #[serde(default)]
    token: Option<String>,
    #[serde(rename = "client-certificate-data", default)]
    client_certificate_data: Option<String>,
    #[serde(rename = "client-certificate", default)]
    client_certificate: Option<String>,
    #[serde(rename = "client-key-data", default)]
    client_key_data: Option<String>,
    #[serde(rename = "client-key", default)]
    client_key: Option<String>,
}
