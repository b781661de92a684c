//! WASM entry points for the JavaScript tool layer.
//!
//! Inputs are JSON strings; outputs are plain JS objects. Validation results
//! are returned as `{valid, errors}`, fallible calls as a `status`-tagged
//! object.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::Error;
use crate::parse::types::Connections;
use crate::registry::capabilities_of as lookup_capabilities;
use crate::validate::{ValidationIssue, ValidationResult};

/// Build connections from `nodes` and `edges` JSON arrays.
#[wasm_bindgen]
pub fn build_connections(nodes_json: &str, edges_json: &str) -> JsValue {
    let result = match build_connections_inner(nodes_json, edges_json) {
        Ok(connections) => BuildResult::Success { connections },
        Err(e) => BuildResult::Error(ErrorDto::from(e)),
    };
    to_js(&result)
}

fn build_connections_inner(nodes_json: &str, edges_json: &str) -> Result<Connections, Error> {
    let nodes = crate::parse::parse_nodes(nodes_json)?;
    let edges = crate::parse::parse_edges(edges_json)?;
    Ok(crate::build::build_connections(&nodes, &edges)?)
}

/// Shape-validate a workflow document JSON.
#[wasm_bindgen]
pub fn validate_workflow_shape(workflow_json: &str) -> JsValue {
    let result = match serde_json::from_str::<serde_json::Value>(workflow_json) {
        Ok(workflow) => crate::validate::validate_workflow_shape(&workflow),
        Err(e) => parse_failure(&Error::from(e)),
    };
    to_js(&result)
}

/// Graph-validate `nodes` and `connections` JSON.
#[wasm_bindgen]
pub fn validate_nodes_and_connections(nodes_json: &str, connections_json: &str) -> JsValue {
    to_js(&validate_nodes_and_connections_inner(nodes_json, connections_json))
}

fn validate_nodes_and_connections_inner(nodes_json: &str, connections_json: &str) -> ValidationResult {
    let nodes = match crate::parse::parse_nodes(nodes_json) {
        Ok(nodes) => nodes,
        Err(e) => return parse_failure(&e),
    };
    let connections = match serde_json::from_str::<serde_json::Value>(connections_json) {
        Ok(connections) => connections,
        Err(e) => return parse_failure(&Error::from(e)),
    };
    crate::validate::validate_nodes_and_connections(&nodes, &connections)
}

/// Resolve a draft (`{name?, nodes, connections?, edges?, settings?}`) and run
/// both validators.
#[wasm_bindgen]
pub fn validate_draft(draft_json: &str) -> JsValue {
    let result = crate::parse::parse_draft(draft_json).and_then(crate::pipeline::validate_draft);
    let result = match result {
        Ok(validation) => DraftResult::Checked(validation),
        Err(e) => DraftResult::Error(ErrorDto::from(e)),
    };
    to_js(&result)
}

/// `{outputs, inputs}` for a node type.
#[wasm_bindgen]
pub fn capabilities_of(node_type: &str) -> JsValue {
    to_js(lookup_capabilities(node_type))
}

fn parse_failure(e: &Error) -> ValidationResult {
    ValidationResult::from_issues(vec![ValidationIssue::new(e.to_string())])
}

/// Maps become plain objects, not ES `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ErrorDto {
    code: String,
    message: String,
    node: Option<String>,
}

impl From<Error> for ErrorDto {
    fn from(e: Error) -> Self {
        let node = match &e {
            Error::Build(build) => Some(build.node().to_string()),
            _ => None,
        };
        ErrorDto {
            code: e.code().to_string(),
            message: e.to_string(),
            node,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum BuildResult {
    #[serde(rename = "success")]
    Success { connections: Connections },
    #[serde(rename = "error")]
    Error(ErrorDto),
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum DraftResult {
    #[serde(rename = "checked")]
    Checked(ValidationResult),
    #[serde(rename = "error")]
    Error(ErrorDto),
}
