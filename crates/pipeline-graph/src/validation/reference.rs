use std::collections::HashSet;

use thiserror::Error;

use crate::graph::Pipeline;

/// An edge whose source or target is not a declared node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Edge references non-existent node: {source_id} -> {target_id}")]
pub struct UnknownNodeReference {
    /// Source identifier of the offending edge
    pub source_id: String,
    /// Target identifier of the offending edge
    pub target_id: String,
}

/// Find the first edge, in input order, with an endpoint outside the node set
pub(crate) fn find_unknown_reference(pipeline: &Pipeline) -> Option<UnknownNodeReference> {
    let node_ids: HashSet<&str> = pipeline.node_ids().collect();

    pipeline
        .edges
        .iter()
        .find(|edge| {
            !node_ids.contains(edge.source.as_str()) || !node_ids.contains(edge.target.as_str())
        })
        .map(|edge| UnknownNodeReference {
            source_id: edge.source.clone(),
            target_id: edge.target.clone(),
        })
}
