//! Liveness and health endpoints

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::server::PipelineServer;

/// Liveness check answering with a fixed payload
pub async fn read_root() -> impl IntoResponse {
    Json(json!({ "Ping": "Pong" }))
}

/// Health check handler
///
/// Reports the service version and the active unknown node policy.
pub async fn health_check(State(server): State<Arc<PipelineServer>>) -> impl IntoResponse {
    debug!("Health check requested");

    Json(json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION"),
        "unknownNodePolicy": server.config.unknown_node_policy,
    }))
}
