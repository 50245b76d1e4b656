use crate::error::GraphError;
use crate::graph::Pipeline;

/// Parse a JSON string into a Pipeline.
///
/// Only decodes the document. Reference and cycle checks are handled
/// separately by the validation module.
pub fn parse_pipeline(json_str: &str) -> Result<Pipeline, GraphError> {
    Pipeline::from_json(json_str)
}
