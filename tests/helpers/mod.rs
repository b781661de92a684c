use serde_json::Value;
use workflow_graph::parse::{self, WorkflowDraft};
use workflow_graph::{Connections, Edge, Node, ValidationResult};

// =============================================================================
// Fixtures
// =============================================================================

pub fn agent_draft() -> WorkflowDraft {
    parse::parse_draft(include_str!("../fixtures/agent_workflow.json")).expect("agent fixture parses")
}

pub fn broken_document() -> Value {
    serde_json::from_str(include_str!("../fixtures/broken_workflow.json")).expect("broken fixture parses")
}

/// Nodes of a raw document, decoded leniently.
pub fn nodes_of(document: &Value) -> Vec<Node> {
    serde_json::from_value(document["nodes"].clone()).expect("nodes decode")
}

pub fn draft_nodes(draft: &WorkflowDraft) -> Vec<Node> {
    draft
        .nodes
        .iter()
        .cloned()
        .map(|n| serde_json::from_value(n).expect("node decodes"))
        .collect()
}

// =============================================================================
// Builders
// =============================================================================

pub fn node(id: &str, name: &str, node_type: &str) -> Node {
    Node::new(id, name, node_type)
}

/// `A`, `B`, `C`, ... all of type `x`.
pub fn plain_nodes(names: &[&str]) -> Vec<Node> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| node(&(i + 1).to_string(), name, "x"))
        .collect()
}

pub fn edge(from: &str, to: &str) -> Edge {
    Edge::new(from, to)
}

// =============================================================================
// Assertions
// =============================================================================

pub fn assert_has_issue(result: &ValidationResult, message: &str) {
    assert!(
        result.errors.iter().any(|e| e.message == message),
        "Expected issue {:?}, got: {:?}",
        message,
        result.messages()
    );
}

pub fn count_issue(result: &ValidationResult, message: &str) -> usize {
    result.errors.iter().filter(|e| e.message == message).count()
}

pub fn assert_valid(result: &ValidationResult) {
    assert!(result.valid, "Expected no issues, got: {:?}", result.messages());
    assert!(result.errors.is_empty());
}

pub fn validate_built(nodes: &[Node], connections: &Connections) -> ValidationResult {
    workflow_graph::validate_nodes_and_connections(nodes, &connections.to_value().unwrap())
}

/// Route `tracing` output to the test harness; set `RUST_LOG=debug` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
