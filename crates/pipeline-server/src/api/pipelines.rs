//! Pipeline parsing endpoints

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    Json,
};
use pipeline_graph::{Pipeline, ValidationReport};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::errors::ApiError;
use crate::server::PipelineServer;

/// Name of the form field carrying the serialized pipeline
const PIPELINE_FIELD: &str = "pipeline";

/// Media type accepted by the form endpoint
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Acknowledge a form-encoded pipeline without validating it.
///
/// The body must be `application/x-www-form-urlencoded` and carry a
/// non-empty `pipeline` field.
#[instrument(skip_all)]
pub async fn parse_pipeline_form(
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with(FORM_CONTENT_TYPE)
        })
        .unwrap_or(false);

    let has_pipeline = is_form
        && url::form_urlencoded::parse(&body)
            .any(|(key, value)| key == PIPELINE_FIELD && !value.is_empty());

    if !has_pipeline {
        return Err(ApiError::UnprocessableEntity(format!(
            "Missing form field: {}",
            PIPELINE_FIELD,
        )));
    }

    Ok(Json(json!({ "status": "parsed" })))
}

/// Validate a JSON pipeline and return its report unchanged
#[instrument(skip_all)]
pub async fn parse_pipeline(
    State(server): State<Arc<PipelineServer>>,
    payload: Result<Json<Pipeline>, JsonRejection>,
) -> Result<Json<ValidationReport>, ApiError> {
    let Json(pipeline) = payload?;

    let report = server.validate(&pipeline);
    info!(
        num_nodes = report.num_nodes,
        num_edges = report.num_edges,
        is_dag = report.is_dag,
        "Pipeline parsed"
    );

    Ok(Json(report))
}
