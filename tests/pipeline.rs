//! Integration tests for draft resolution and combined validation.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use serde_json::json;
use workflow_graph::parse::{self, WorkflowDraft};
use workflow_graph::pipeline::{resolve_draft, validate_draft};
use workflow_graph::{BuildError, Error};

fn draft(value: serde_json::Value) -> WorkflowDraft {
    serde_json::from_value(value).unwrap()
}

#[test]
fn agent_draft_is_valid() {
    init_tracing();
    let result = validate_draft(agent_draft()).expect("Should resolve");
    assert_valid(&result);
    assert_eq!(result.summary(), "Workflow is valid");
}

#[test]
fn resolved_document_uses_built_connections() {
    let resolved = resolve_draft(agent_draft()).unwrap();
    let doc = resolved.to_document();
    assert_eq!(doc["name"], json!("Support Triage Agent"));
    assert_eq!(
        doc["connections"]["Route"]["main"][1],
        json!([{"node": "Log Ticket", "type": "main", "index": 0}])
    );
    assert_eq!(doc["settings"]["saveDataSuccessExecution"], json!("all"));
}

#[test]
fn shape_issues_precede_graph_issues() {
    let result = validate_draft(draft(json!({
        "nodes": [
            {"id": "1", "name": "A", "type": "x"},
            {"id": "1", "name": "B", "type": "x", "position": [0, 0]}
        ],
        "settings": {"timezone": 3}
    })))
    .unwrap();
    let mut shape: Vec<(&str, &str)> = result.errors[..2]
        .iter()
        .filter_map(|e| Some((e.path.as_deref()?, e.message.as_str())))
        .collect();
    shape.sort();
    assert_eq!(shape.len(), 2, "{:?}", result.errors);
    assert_eq!(shape[0].0, "/nodes/0");
    assert!(shape[0].1.contains("position"), "{:?}", shape);
    assert_eq!(shape[1].0, "/settings/timezone");
    assert!(shape[1].1.contains("string"), "{:?}", shape);

    let messages = result.messages();
    assert_eq!(messages[2..], ["Node \"A\" has invalid position", "Duplicate node id: 1"]);
    assert!(result.summary().starts_with("Validation failed with 4 issue(s):\n- "));
}

#[test]
fn builder_failure_is_an_error() {
    let err = validate_draft(draft(json!({
        "nodes": [{"id": "1", "name": "A", "type": "x", "position": [0, 0]}],
        "edges": [{"from": "A", "to": "B"}]
    })))
    .unwrap_err();
    assert!(matches!(err, Error::Build(BuildError::UnknownTargetNode { ref node }) if node == "B"));
}

#[test]
fn draft_json_round_trip_through_parser() {
    let json = r#"{"nodes": [{"id": "1", "name": "A", "type": "x", "position": [0, 0]}], "edges": []}"#;
    let draft = parse::parse_draft(json).unwrap();
    let result = validate_draft(draft).unwrap();
    assert_valid(&result);
}

#[test]
fn malformed_draft_json() {
    let err = parse::parse_draft("{nodes: []").unwrap_err();
    assert_eq!(err.code(), "P001");
}

#[test]
fn null_and_numeric_node_fields_still_collect_every_issue() {
    let json = r#"{
        "nodes": [
            {"id": 7, "name": "A", "type": "x", "position": [0, 0]},
            {"id": "2", "name": null, "type": "x", "position": [0, 0]}
        ],
        "connections": {"A": {"main": [[{"node": "Ghost", "type": "main", "index": 0}]]}}
    }"#;
    let result = validate_draft(parse::parse_draft(json).unwrap()).unwrap();
    assert!(!result.valid);
    assert_eq!(result.errors[0].path.as_deref(), Some("/nodes/0/id"));
    assert_eq!(result.errors[1].path.as_deref(), Some("/nodes/1/name"));
    assert_has_issue(&result, "Node missing name");
    assert_has_issue(&result, "Target node not found: Ghost (from A.main)");
}
