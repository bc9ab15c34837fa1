//! # Web API Module
//!
//! Axum-based read-only API over workflow execution state, consumed by the
//! browser visualization page.
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route definitions
//! - [`handlers`] - Request handlers
//! - [`state`] - Shared application state
//! - [`errors`] - Web-specific error type and HTTP status mapping

pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Create the main Axum application with all routes and middleware.
///
/// The API is fully public; CORS stays wide open so the page can be served
/// from anywhere during development. Anything that is not an API or health
/// route falls through to the static visualization assets.
pub fn create_app(app_state: AppState) -> Router {
    let static_site = ServeDir::new(app_state.config.static_dir.clone());

    Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::health_routes())
        .fallback_service(static_site)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
