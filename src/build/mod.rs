//! Build phase: edge list → nested, port-indexed `Connections`.
//!
//! Fail-fast: the first edge naming an unknown node, an unsupported port or
//! an output index of [`MAX_OUTPUT_SLOTS`] or more aborts the whole build.
//! Targets are appended in edge order and never deduplicated.

use std::collections::HashMap;

use crate::error::BuildError;
use crate::parse::types::{ConnectionTarget, Connections, Edge, MAX_OUTPUT_SLOTS, Node};
use crate::registry::CapabilityRegistry;

/// Build connections against the builtin capability registry.
pub fn build_connections(nodes: &[Node], edges: &[Edge]) -> Result<Connections, BuildError> {
    build_connections_with(CapabilityRegistry::builtin(), nodes, edges)
}

pub fn build_connections_with(
    registry: &CapabilityRegistry,
    nodes: &[Node],
    edges: &[Edge],
) -> Result<Connections, BuildError> {
    // Later nodes with the same name win, as a plain map insert would.
    let name_to_type: HashMap<&str, &str> = nodes
        .iter()
        .map(|n| (n.name.as_str(), n.node_type.as_str()))
        .collect();

    let mut connections = Connections::new();

    for edge in edges {
        let target = resolve_edge(registry, &name_to_type, edge).inspect_err(|e| {
            tracing::debug!(code = e.code(), error = %e, "rejecting edge");
        })?;
        let slot = edge.source_slot();
        let Some(targets) = connections.slot_mut(&edge.from, edge.source_port(), slot) else {
            let err = BuildError::OutputIndexOutOfRange {
                node: edge.from.clone(),
                index: slot,
                max: MAX_OUTPUT_SLOTS - 1,
            };
            tracing::debug!(code = err.code(), error = %err, "rejecting edge");
            return Err(err);
        };
        targets.push(target);
    }

    tracing::debug!(
        edges = edges.len(),
        sources = connections.0.len(),
        "built connections from edges"
    );

    Ok(connections)
}

fn resolve_edge(
    registry: &CapabilityRegistry,
    name_to_type: &HashMap<&str, &str>,
    edge: &Edge,
) -> Result<ConnectionTarget, BuildError> {
    let from_type = *name_to_type
        .get(edge.from.as_str())
        .ok_or_else(|| BuildError::UnknownSourceNode {
            node: edge.from.clone(),
        })?;
    let to_type = *name_to_type
        .get(edge.to.as_str())
        .ok_or_else(|| BuildError::UnknownTargetNode {
            node: edge.to.clone(),
        })?;

    let from_port = edge.source_port();
    let to_port = edge.target_port();

    if !registry.lookup(from_type).has_output(from_port) {
        return Err(BuildError::UnsupportedOutputPort {
            node: edge.from.clone(),
            node_type: from_type.to_string(),
            port: from_port.to_string(),
        });
    }
    if !registry.lookup(to_type).has_input(to_port) {
        return Err(BuildError::UnsupportedInputPort {
            node: edge.to.clone(),
            node_type: to_type.to_string(),
            port: to_port.to_string(),
        });
    }

    Ok(ConnectionTarget {
        node: edge.to.clone(),
        port: to_port.to_string(),
        index: edge.target_slot(),
    })
}
