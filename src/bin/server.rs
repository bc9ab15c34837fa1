//! # Argo Lens Server
//!
//! Thin wrapper binary for running the viewer as a standalone server.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin server
//!
//! # Run against a different namespace
//! ARGO_NAMESPACE=workflows cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use argo_lens::config::AppConfig;
use argo_lens::kube::{KubeClient, KubeSettings};
use argo_lens::logging;
use argo_lens::service::WorkflowService;
use argo_lens::web::{create_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first
    logging::init_structured_logging();

    info!("🚀 Starting Argo Lens server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env().context("loading configuration")?;
    info!("   Namespace: {}", config.namespace);
    info!("   Static assets: {}", config.static_dir);

    // Credentials are resolved once here; every request reuses the client
    let settings = KubeSettings::resolve().context("resolving control plane credentials")?;
    let client =
        KubeClient::new(&settings, &config.namespace).context("building control plane client")?;

    let service = WorkflowService::new(Arc::new(client));
    let app = create_app(AppState::new(service, config.clone()));

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("binding {}", config.bind_address))?;

    info!(address = %config.bind_address, "🎉 Argo Lens listening");
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("👋 Argo Lens shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
