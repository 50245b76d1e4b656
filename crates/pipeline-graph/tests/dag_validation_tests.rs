use pipeline_graph::{
    parse_and_validate_pipeline, DagValidator, Edge, Node, Pipeline, PipelineValidator,
    UnknownNodePolicy, ValidationReport,
};
use pretty_assertions::assert_eq;

fn pipeline(nodes: &[&str], edges: &[(&str, &str)]) -> Pipeline {
    Pipeline::new(
        nodes.iter().map(|id| Node::new(*id)).collect(),
        edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect(),
    )
}

fn strict() -> DagValidator {
    DagValidator::new(UnknownNodePolicy::Reject)
}

fn lenient() -> DagValidator {
    DagValidator::new(UnknownNodePolicy::Ignore)
}

#[test]
fn test_empty_pipeline_is_dag() {
    for validator in [strict(), lenient()] {
        let report = validator.validate(&Pipeline::default());
        assert_eq!(report, ValidationReport::new(0, 0, true));
    }
}

#[test]
fn test_nodes_without_edges_are_dag() {
    let report = strict().validate(&pipeline(&["a", "b", "c"], &[]));
    assert_eq!(report, ValidationReport::new(3, 0, true));
}

#[test]
fn test_self_loop_is_cycle() {
    let report = strict().validate(&pipeline(&["a"], &[("a", "a")]));
    assert_eq!(report, ValidationReport::new(1, 1, false));
}

#[test]
fn test_two_node_cycle() {
    let report = strict().validate(&pipeline(&["a", "b"], &[("a", "b"), ("b", "a")]));
    assert_eq!(report, ValidationReport::new(2, 2, false));
}

#[test]
fn test_linear_chain() {
    let report = strict().validate(&pipeline(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "C"), ("C", "D")],
    ));
    assert_eq!(report, ValidationReport::new(4, 3, true));
}

#[test]
fn test_diamond() {
    let report = strict().validate(&pipeline(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
    ));
    assert_eq!(report, ValidationReport::new(4, 4, true));
}

#[test]
fn test_duplicate_edges_are_harmless() {
    let report = strict().validate(&pipeline(
        &["A", "B", "C"],
        &[("A", "B"), ("A", "B"), ("B", "C"), ("B", "C")],
    ));
    assert_eq!(report, ValidationReport::new(3, 4, true));
}

#[test]
fn test_cycle_in_any_component_fails_verdict() {
    let report = strict().validate(&pipeline(
        &["a", "b", "island", "x", "y"],
        &[("a", "b"), ("x", "y"), ("y", "x")],
    ));
    assert!(!report.is_dag);
    assert_eq!(report.error, None);
}

#[test]
fn test_strict_unknown_nodes() {
    let report = strict().validate(&pipeline(&[], &[("X", "Y")]));
    assert_eq!(
        report,
        ValidationReport {
            num_nodes: 0,
            num_edges: 1,
            is_dag: false,
            error: Some("Edge references non-existent node: X -> Y".to_string()),
        }
    );
}

#[test]
fn test_strict_reference_check_precedes_cycle_detection() {
    // The cycle a <-> b is never reported, the dangling edge wins
    let report = strict().validate(&pipeline(
        &["a", "b"],
        &[("a", "b"), ("b", "a"), ("b", "nowhere")],
    ));
    assert_eq!(
        report.error.as_deref(),
        Some("Edge references non-existent node: b -> nowhere")
    );
    assert!(!report.is_dag);
}

#[test]
fn test_lenient_unknown_nodes() {
    let report = lenient().validate(&pipeline(&[], &[("X", "Y")]));
    assert_eq!(report, ValidationReport::new(0, 1, true));

    let report = lenient().validate(&pipeline(&["a"], &[("a", "X"), ("X", "a")]));
    assert_eq!(report, ValidationReport::new(1, 2, false));
}

#[test]
fn test_duplicate_node_ids_keep_literal_count() {
    let report = strict().validate(&pipeline(&["a", "a", "b"], &[("a", "b")]));
    assert_eq!(report, ValidationReport::new(3, 1, true));
}

#[test]
fn test_validation_is_idempotent() {
    let validator = strict();
    let graph = pipeline(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")],
    );

    let first = validator.validate(&graph);
    let second = validator.validate(&graph);
    assert_eq!(first, second);
    assert!(!first.is_dag);
}

#[test]
fn test_counts_match_input_regardless_of_verdict() {
    let cases = vec![
        pipeline(&["a"], &[]),
        pipeline(&["a", "b"], &[("a", "b"), ("b", "a"), ("a", "a")]),
        pipeline(&["a"], &[("a", "ghost"), ("ghost", "a")]),
    ];

    for graph in &cases {
        for validator in [strict(), lenient()] {
            let report = validator.validate(graph);
            assert_eq!(report.num_nodes, graph.nodes.len());
            assert_eq!(report.num_edges, graph.edges.len());
        }
    }
}

#[test]
fn test_parse_and_validate_editor_payload() {
    let json = r#"{
        "nodes": [
            {"id": "customInput-1", "type": "customInput", "data": {"inputName": "q"}},
            {"id": "text-1", "type": "text", "data": {"text": "{{q}}"}},
            {"id": "llm-1", "type": "llm"},
            {"id": "customOutput-1", "type": "customOutput"}
        ],
        "edges": [
            {"id": "e1", "source": "customInput-1", "target": "text-1"},
            {"id": "e2", "source": "text-1", "target": "llm-1", "targetHandle": "llm-1-prompt"},
            {"id": "e3", "source": "llm-1", "target": "customOutput-1"}
        ]
    }"#;

    let report = parse_and_validate_pipeline(json, UnknownNodePolicy::Reject)
        .expect("payload should decode");
    assert_eq!(report, ValidationReport::new(4, 3, true));
}

#[test]
fn test_parse_and_validate_rejects_bad_json() {
    let json = r#"{"nodes": "nope", "edges": []}"#;
    let err = parse_and_validate_pipeline(json, UnknownNodePolicy::Reject).unwrap_err();
    assert_eq!(err.error_code(), "ERR_PIPELINE_JSON_PARSE");
}
