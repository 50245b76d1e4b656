//! API module for the Pipeline Server
//!
//! This module contains the API routes and handlers for the Pipeline Server.

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub mod errors;
pub mod health;
pub mod pipelines;

use crate::config::ServerConfig;
use crate::server::PipelineServer;

/// Build the router for API endpoints
pub fn build_router(server: Arc<PipelineServer>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.config))
        .layer(DefaultBodyLimit::max(server.config.max_body_bytes));

    Router::new()
        // Liveness
        .route("/", get(health::read_root))
        .route("/health", get(health::health_check))

        // Pipeline validation
        .route(
            "/pipelines/parse",
            get(pipelines::parse_pipeline_form).post(pipelines::parse_pipeline),
        )

        .layer(middleware)
        .with_state(server)
}

/// Cross-origin policy for the configured origins.
///
/// A wildcard accepts any origin without credentials; an explicit list
/// mirrors the request's method and headers and allows credentials.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

// Re-export all modules for easier imports
pub use errors::*;
pub use health::*;
pub use pipelines::*;
