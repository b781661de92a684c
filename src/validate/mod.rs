//! Validation phase.
//!
//! Two independent, never-failing checks: `shape` validates the document
//! against the fixed workflow schema, and `validate_nodes_and_connections`
//! checks the graph semantics (unique names/ids, legal ports, resolvable
//! targets and expression references). Callers merge the two results.

pub mod node_rules;
pub mod references;
pub mod schema;
pub mod shape;
pub mod structural;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parse::types::Node;
use crate::registry::CapabilityRegistry;

pub use shape::{validate_workflow_shape, validate_workflow_shape_with};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Only schema-sourced issues carry a path; graph issues locate
    /// themselves in the message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationIssue {
            path: None,
            message: message.into(),
        }
    }

    pub fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: Some(path.into()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({})", self.message, path),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        ValidationResult {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn ok() -> Self {
        Self::from_issues(Vec::new())
    }

    /// Append `other`'s issues after this result's.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        Self::from_issues(self.errors)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Human-readable report in the form the tool layer returns.
    pub fn summary(&self) -> String {
        if self.valid {
            return "Workflow is valid".to_string();
        }
        format!(
            "Validation failed with {} issue(s):\n- {}",
            self.errors.len(),
            self.messages().join("\n- ")
        )
    }
}

/// Graph-level validation against the builtin capability registry.
pub fn validate_nodes_and_connections(nodes: &[Node], connections: &Value) -> ValidationResult {
    validate_nodes_and_connections_with(CapabilityRegistry::builtin(), nodes, connections)
}

/// Run every graph check and collect all issues. Order: node rules,
/// connections, expression references.
pub fn validate_nodes_and_connections_with(
    registry: &CapabilityRegistry,
    nodes: &[Node],
    connections: &Value,
) -> ValidationResult {
    let mut errors = Vec::new();

    let index = node_rules::validate_nodes(nodes, &mut errors);
    structural::validate_connections(registry, &index, connections, &mut errors);
    references::validate_expression_refs(nodes, &index, &mut errors);

    tracing::debug!(
        nodes = nodes.len(),
        issues = errors.len(),
        "validated nodes and connections"
    );

    ValidationResult::from_issues(errors)
}
