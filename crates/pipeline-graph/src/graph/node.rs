use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single node placed in the pipeline editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier of the node, expected to be unique within a pipeline
    pub id: String,

    /// Optional node kind as chosen in the editor (e.g. "customInput", "llm")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Opaque attributes attached by the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl Node {
    /// Create a node with only an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: None,
            data: None,
        }
    }
}
