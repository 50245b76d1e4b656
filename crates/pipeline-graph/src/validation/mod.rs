use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::Pipeline;

mod dag_validator;
mod reference;

pub use dag_validator::DagValidator;
pub use reference::UnknownNodeReference;

/// Structural facts about a submitted pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of nodes as submitted
    pub num_nodes: usize,

    /// Number of edges as submitted
    pub num_edges: usize,

    /// Whether the pipeline is a directed acyclic graph
    pub is_dag: bool,

    /// Soft error explaining a failed verdict, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationReport {
    /// Report for a pipeline that passed reference checks
    pub fn new(num_nodes: usize, num_edges: usize, is_dag: bool) -> Self {
        Self {
            num_nodes,
            num_edges,
            is_dag,
            error: None,
        }
    }

    /// Report for a pipeline rejected because of a dangling edge
    pub fn rejected(num_nodes: usize, num_edges: usize, reference: &UnknownNodeReference) -> Self {
        Self {
            num_nodes,
            num_edges,
            is_dag: false,
            error: Some(reference.to_string()),
        }
    }
}

/// What to do with edges whose endpoints are not declared as nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownNodePolicy {
    /// Fail the verdict and report the first offending edge
    #[default]
    Reject,

    /// Treat unknown endpoints as implicit nodes
    Ignore,
}

impl UnknownNodePolicy {
    /// Lowercase name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownNodePolicy::Reject => "reject",
            UnknownNodePolicy::Ignore => "ignore",
        }
    }
}

impl fmt::Display for UnknownNodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownNodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(UnknownNodePolicy::Reject),
            "ignore" => Ok(UnknownNodePolicy::Ignore),
            other => Err(format!("unknown node policy '{}', expected 'reject' or 'ignore'", other)),
        }
    }
}

/// A trait for validators that inspect a submitted pipeline
pub trait PipelineValidator: Send + Sync {
    /// Produce a report for the pipeline. Never fails for well-formed input.
    fn validate(&self, pipeline: &Pipeline) -> ValidationReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization_omits_missing_error() {
        let report = ValidationReport::new(2, 1, true);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"num_nodes": 2, "num_edges": 1, "is_dag": true}));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("reject".parse::<UnknownNodePolicy>(), Ok(UnknownNodePolicy::Reject));
        assert_eq!(" IGNORE ".parse::<UnknownNodePolicy>(), Ok(UnknownNodePolicy::Ignore));
        assert!("drop".parse::<UnknownNodePolicy>().is_err());
        assert_eq!(UnknownNodePolicy::default(), UnknownNodePolicy::Reject);
    }
}
