use std::collections::HashMap;

use tracing::debug;

use crate::graph::Pipeline;
use crate::validation::reference::{find_unknown_reference, UnknownNodeReference};
use crate::validation::{PipelineValidator, UnknownNodePolicy, ValidationReport};

/// DFS bookkeeping for a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet explored
    White,
    /// On the active DFS path
    Gray,
    /// Fully explored, no cycle through it
    Black,
}

/// Outcome of a single DFS tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    Acyclic,
    CycleFound,
}

/// Adjacency list keyed by dense node indices.
/// Keys keep first-seen order: declared nodes first, then synthesized endpoints.
#[derive(Debug)]
struct Adjacency<'a> {
    ids: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    targets: Vec<Vec<usize>>,
}

impl<'a> Adjacency<'a> {
    fn build(pipeline: &'a Pipeline, policy: UnknownNodePolicy) -> Self {
        let mut adjacency = Adjacency {
            ids: Vec::with_capacity(pipeline.nodes.len()),
            index: HashMap::with_capacity(pipeline.nodes.len()),
            targets: Vec::with_capacity(pipeline.nodes.len()),
        };

        // Duplicate node ids collapse onto their first occurrence
        for id in pipeline.node_ids() {
            adjacency.intern(id);
        }

        for edge in &pipeline.edges {
            let endpoints = match policy {
                UnknownNodePolicy::Ignore => Some((
                    adjacency.intern(&edge.source),
                    adjacency.intern(&edge.target),
                )),
                UnknownNodePolicy::Reject => adjacency
                    .lookup(&edge.source)
                    .zip(adjacency.lookup(&edge.target)),
            };

            if let Some((source, target)) = endpoints {
                adjacency.targets[source].push(target);
            }
        }

        adjacency
    }

    fn intern(&mut self, id: &'a str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id);
        self.index.insert(id, idx);
        self.targets.push(Vec::new());
        idx
    }

    fn lookup(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Checks edge references and detects cycles in a pipeline
#[derive(Debug, Clone, Default)]
pub struct DagValidator {
    policy: UnknownNodePolicy,
}

impl DagValidator {
    /// Create a new validator with the given unknown node policy
    pub fn new(policy: UnknownNodePolicy) -> Self {
        DagValidator { policy }
    }

    /// Decide whether the pipeline is a DAG.
    ///
    /// Under [`UnknownNodePolicy::Reject`] the first edge pointing outside the
    /// node set is returned as an error and no cycle detection takes place.
    pub fn check(&self, pipeline: &Pipeline) -> Result<bool, UnknownNodeReference> {
        if self.policy == UnknownNodePolicy::Reject {
            if let Some(reference) = find_unknown_reference(pipeline) {
                debug!(
                    source = %reference.source_id,
                    target = %reference.target_id,
                    "Edge references unknown node"
                );
                return Err(reference);
            }
        }

        let adjacency = Adjacency::build(pipeline, self.policy);
        Ok(!Self::has_cycle(&adjacency))
    }

    /// Launch a DFS from every unvisited node, in adjacency key order,
    /// stopping at the first cycle found in any component.
    fn has_cycle(adjacency: &Adjacency<'_>) -> bool {
        let mut colors = vec![Color::White; adjacency.len()];
        let mut stack = Vec::new();

        for root in 0..adjacency.len() {
            if colors[root] != Color::White {
                continue;
            }
            if Self::visit(root, adjacency, &mut colors, &mut stack) == Traversal::CycleFound {
                debug!(root = adjacency.ids[root], "Cycle detected");
                return true;
            }
        }

        false
    }

    /// Iterative three-color DFS from `root`.
    ///
    /// Each stack frame holds a node and the position of the next neighbour to
    /// examine, so finishing a node happens exactly when its neighbours run out.
    fn visit(
        root: usize,
        adjacency: &Adjacency<'_>,
        colors: &mut [Color],
        stack: &mut Vec<(usize, usize)>,
    ) -> Traversal {
        colors[root] = Color::Gray;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;

            match adjacency.targets[node].get(next) {
                Some(&neighbour) => {
                    frame.1 += 1;
                    match colors[neighbour] {
                        Color::White => {
                            colors[neighbour] = Color::Gray;
                            stack.push((neighbour, 0));
                        }
                        // Back edge to an ancestor on the current path
                        Color::Gray => {
                            stack.clear();
                            return Traversal::CycleFound;
                        }
                        Color::Black => {}
                    }
                }
                None => {
                    colors[node] = Color::Black;
                    stack.pop();
                }
            }
        }

        Traversal::Acyclic
    }
}

impl PipelineValidator for DagValidator {
    fn validate(&self, pipeline: &Pipeline) -> ValidationReport {
        let num_nodes = pipeline.nodes.len();
        let num_edges = pipeline.edges.len();

        let report = match self.check(pipeline) {
            Ok(is_dag) => ValidationReport::new(num_nodes, num_edges, is_dag),
            Err(reference) => ValidationReport::rejected(num_nodes, num_edges, &reference),
        };

        debug!(
            num_nodes,
            num_edges,
            is_dag = report.is_dag,
            policy = %self.policy,
            "Validated pipeline"
        );

        report
    }
}
