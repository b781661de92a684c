//! Integration tests for shape validation against the workflow schema.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use serde_json::json;
use workflow_graph::{ValidationResult, validate_workflow_shape};

#[test]
fn complete_document_passes() {
    let doc = json!({
        "name": "w",
        "nodes": [{"id": "1", "name": "A", "type": "x", "position": [0, 0], "typeVersion": 1, "parameters": {}}],
        "connections": {},
        "settings": {
            "saveExecutionProgress": true,
            "saveDataErrorExecution": "none",
            "executionTimeout": 60,
            "timezone": "Europe/Berlin",
            "executionOrder": "v1",
            "callerPolicy": "any"
        },
        "active": false
    });
    let result = validate_workflow_shape(&doc);
    assert_valid(&result);
}

/// Paths of every issue, sorted; the checker's keyword order is its own.
fn sorted_paths(result: &ValidationResult) -> Vec<&str> {
    let mut paths: Vec<&str> = result.errors.iter().filter_map(|e| e.path.as_deref()).collect();
    paths.sort();
    paths
}

#[test]
fn broken_fixture_shape_issues_carry_paths() {
    let result = validate_workflow_shape(&broken_document());
    assert_eq!(
        sorted_paths(&result),
        vec![
            "/nodes/2/position",
            "/settings/executionTimeout",
            "/settings/saveDataErrorExecution",
        ]
    );
    assert!(result.errors.iter().all(|e| !e.message.is_empty()));
}

#[test]
fn node_missing_required_fields() {
    let doc = json!({
        "name": "w",
        "nodes": [{"name": "A"}, "not a node"],
        "connections": [],
        "settings": {}
    });
    let result = validate_workflow_shape(&doc);
    assert_eq!(
        sorted_paths(&result),
        vec!["/connections", "/nodes/0", "/nodes/0", "/nodes/0", "/nodes/1"]
    );
    let node_zero: Vec<&str> = result
        .errors
        .iter()
        .filter(|e| e.path.as_deref() == Some("/nodes/0"))
        .map(|e| e.message.as_str())
        .collect();
    for field in ["id", "type", "position"] {
        assert!(node_zero.iter().any(|m| m.contains(field)), "{:?}", node_zero);
    }
}

#[test]
fn wrong_field_types() {
    let doc = json!({"name": 5, "nodes": {}, "connections": {}, "settings": "default"});
    let result = validate_workflow_shape(&doc);
    assert_eq!(sorted_paths(&result), vec!["/name", "/nodes", "/settings"]);
}

#[test]
fn non_string_node_fields_are_shape_issues() {
    let doc = json!({
        "name": "w",
        "nodes": [{"id": 7, "name": null, "type": "x", "position": [0, 0]}],
        "connections": {},
        "settings": {}
    });
    let result = validate_workflow_shape(&doc);
    assert_eq!(sorted_paths(&result), vec!["/nodes/0/id", "/nodes/0/name"]);
}

#[test]
fn root_findings_fall_back_to_schema_path() {
    let result = validate_workflow_shape(&json!("workflow"));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path.as_deref(), Some("#/type"));
}
