//! # Pipeline Graph
//!
//! Data model and structural validation for pipelines built in the visual
//! pipeline editor. A pipeline is a set of nodes joined by directed edges; this
//! crate reports how many of each were submitted and whether they form a
//! directed acyclic graph.
//!
//! ## Features
//!
//! * Serde model matching the editor's JSON payload
//! * Referential checks of edges against declared nodes
//! * Configurable handling of edges to unknown nodes
//! * Iterative three-color DFS cycle detection, safe for deep graphs
//!
//! ## Example
//!
//! ```
//! use pipeline_graph::{parse_and_validate_pipeline, UnknownNodePolicy};
//!
//! let json = r#"{
//!     "nodes": [{"id": "input"}, {"id": "llm"}, {"id": "output"}],
//!     "edges": [
//!         {"source": "input", "target": "llm"},
//!         {"source": "llm", "target": "output"}
//!     ]
//! }"#;
//!
//! let report = parse_and_validate_pipeline(json, UnknownNodePolicy::Reject).unwrap();
//! assert_eq!(report.num_nodes, 3);
//! assert_eq!(report.num_edges, 2);
//! assert!(report.is_dag);
//! ```

mod error;
mod parser;

pub mod graph;
pub mod validation;

pub use error::GraphError;
pub use graph::{Edge, Node, Pipeline};
pub use parser::parse_pipeline;
pub use validation::{
    DagValidator, PipelineValidator, UnknownNodePolicy, UnknownNodeReference, ValidationReport,
};

/// Parse a pipeline JSON document and produce its validation report.
///
/// Decoding failures are errors; a failed verdict is not. Dangling edges and
/// cycles are described by the returned [`ValidationReport`].
///
/// # Errors
///
/// Returns [`GraphError::JsonError`] when the document is not valid JSON or
/// does not match the pipeline shape.
pub fn parse_and_validate_pipeline(
    json_str: &str,
    policy: UnknownNodePolicy,
) -> Result<ValidationReport, GraphError> {
    let pipeline = parse_pipeline(json_str)?;
    Ok(DagValidator::new(policy).validate(&pipeline))
}
