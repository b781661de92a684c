//! Draft resolution and the combined shape + graph check callers run before
//! handing a workflow to the engine.

use serde_json::{Map, Value};

use crate::build;
use crate::error::Error;
use crate::parse::types::{Node, WorkflowDraft, WorkflowSettings};
use crate::registry::CapabilityRegistry;
use crate::validate::{self, ValidationResult};

/// Name used when a draft is validated without one.
pub const VALIDATION_ONLY_NAME: &str = "ValidationOnly";

/// A draft with connections built and defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWorkflow {
    pub name: String,
    /// Nodes exactly as the caller sent them.
    pub raw_nodes: Vec<Value>,
    pub nodes: Vec<Node>,
    pub connections: Value,
    pub settings: Value,
}

impl ResolvedWorkflow {
    /// `{name, nodes, connections, settings}` as checked by shape validation
    /// and sent to the engine.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("name".into(), Value::String(self.name.clone()));
        doc.insert("nodes".into(), Value::Array(self.raw_nodes.clone()));
        doc.insert("connections".into(), self.connections.clone());
        doc.insert("settings".into(), self.settings.clone());
        Value::Object(doc)
    }
}

pub fn resolve_draft(draft: WorkflowDraft) -> Result<ResolvedWorkflow, Error> {
    resolve_draft_with(CapabilityRegistry::builtin(), draft)
}

/// Explicit connections win over edges; with neither, connections are empty.
pub fn resolve_draft_with(registry: &CapabilityRegistry, draft: WorkflowDraft) -> Result<ResolvedWorkflow, Error> {
    if draft.nodes.is_empty() {
        return Err(Error::EmptyNodes);
    }

    let nodes: Vec<Node> = draft.nodes.iter().map(Node::from_raw).collect();

    let connections = match (draft.connections, draft.edges) {
        (Some(connections), _) => connections,
        (None, Some(edges)) => build::build_connections_with(registry, &nodes, &edges)?.to_value()?,
        (None, None) => Value::Object(Map::new()),
    };

    let settings = match draft.settings {
        Some(settings) => settings,
        None => serde_json::to_value(WorkflowSettings::default())?,
    };

    Ok(ResolvedWorkflow {
        name: draft.name.unwrap_or_else(|| VALIDATION_ONLY_NAME.to_string()),
        raw_nodes: draft.nodes,
        nodes,
        connections,
        settings,
    })
}

/// Shape issues first, then graph issues.
pub fn validate_resolved(registry: &CapabilityRegistry, workflow: &ResolvedWorkflow) -> ValidationResult {
    let shape = validate::validate_workflow_shape(&workflow.to_document());
    let graph = validate::validate_nodes_and_connections_with(registry, &workflow.nodes, &workflow.connections);
    let result = shape.merge(graph);
    if !result.valid {
        tracing::debug!(
            workflow = %workflow.name,
            issues = result.errors.len(),
            "workflow rejected"
        );
    }
    result
}

/// Resolve and validate. Builder failures and an empty node list are `Err`;
/// everything else, including wrong-typed node fields, is reported in the
/// result.
pub fn validate_draft(draft: WorkflowDraft) -> Result<ValidationResult, Error> {
    validate_draft_with(CapabilityRegistry::builtin(), draft)
}

pub fn validate_draft_with(registry: &CapabilityRegistry, draft: WorkflowDraft) -> Result<ValidationResult, Error> {
    let workflow = resolve_draft_with(registry, draft)?;
    Ok(validate_resolved(registry, &workflow))
}
