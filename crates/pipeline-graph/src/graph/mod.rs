mod edge;
mod node;

pub use edge::Edge;
pub use node::Node;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A pipeline snapshot as submitted by the editor.
/// Nodes and edges are kept in the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Nodes of the pipeline
    pub nodes: Vec<Node>,

    /// Directed edges between nodes
    pub edges: Vec<Edge>,
}

impl Pipeline {
    /// Create a pipeline from its parts
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Decode a pipeline from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Node identifiers in input order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|node| node.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_editor_payload() {
        // Shape produced by the front-end store, including fields we ignore
        let json = r#"{
            "nodes": [
                {"id": "customInput-1", "type": "customInput", "position": {"x": 10, "y": 20},
                 "data": {"id": "customInput-1", "nodeType": "customInput"}},
                {"id": "llm-1", "type": "llm", "data": null, "selected": true}
            ],
            "edges": [
                {"id": "reactflow__edge-1", "source": "customInput-1", "target": "llm-1",
                 "sourceHandle": "customInput-1-value", "targetHandle": "llm-1-prompt",
                 "type": "smoothstep", "animated": true}
            ]
        }"#;

        let pipeline = Pipeline::from_json(json).expect("payload should decode");
        assert_eq!(pipeline.nodes.len(), 2);
        assert_eq!(pipeline.nodes[0].node_type.as_deref(), Some("customInput"));
        assert!(pipeline.nodes[1].data.is_none());
        assert_eq!(pipeline.edges[0].id.as_deref(), Some("reactflow__edge-1"));
        assert_eq!(pipeline.edges[0].target_handle.as_deref(), Some("llm-1-prompt"));
        assert_eq!(pipeline.node_ids().collect::<Vec<_>>(), vec!["customInput-1", "llm-1"]);
    }

    #[test]
    fn test_missing_edges_is_rejected() {
        let result = Pipeline::from_json(r#"{"nodes": []}"#);
        assert!(matches!(result, Err(GraphError::JsonError(_))));
    }

    #[test]
    fn test_edge_without_target_is_rejected() {
        let result = Pipeline::from_json(r#"{"nodes": [{"id": "a"}], "edges": [{"source": "a"}]}"#);
        assert!(result.is_err());
    }
}
