//! Connection structure rules: sources, output ports, slots, targets.
//!
//! Connections are checked as raw JSON because directly authored graphs may
//! be malformed at any depth. An unknown source only skips that source; an
//! illegal port name still has its contents checked.

use serde_json::{Map, Value};

use crate::registry::CapabilityRegistry;

use super::ValidationIssue;
use super::node_rules::NodeIndex;

pub fn validate_connections(
    registry: &CapabilityRegistry,
    index: &NodeIndex<'_>,
    connections: &Value,
    errors: &mut Vec<ValidationIssue>,
) {
    let sources = match connections {
        Value::Null => return,
        Value::Object(sources) => sources,
        _ => {
            errors.push(ValidationIssue::new(
                "Connections must be an object keyed by source node name",
            ));
            return;
        }
    };

    for (source_name, ports) in sources {
        let Some(source) = index.get(source_name) else {
            errors.push(ValidationIssue::new(format!(
                "Connections reference unknown source node: {}",
                source_name
            )));
            continue;
        };
        let Value::Object(ports) = ports else {
            errors.push(ValidationIssue::new(format!(
                "Connections for \"{}\" must be an object keyed by output port",
                source_name
            )));
            continue;
        };
        let caps = registry.lookup(&source.node_type);

        for (port_name, slots) in ports {
            if !caps.has_output(port_name) {
                errors.push(ValidationIssue::new(format!(
                    "Node \"{}\" (type {}) cannot output on port \"{}\"",
                    source_name, source.node_type, port_name
                )));
            }
            let Value::Array(slots) = slots else {
                errors.push(ValidationIssue::new(format!(
                    "Port \"{}.{}\" must be an array per output index",
                    source_name, port_name
                )));
                continue;
            };
            let location = PortLocation {
                source: source_name,
                port: port_name,
            };
            validate_slots(registry, index, &location, slots, errors);
        }
    }
}

struct PortLocation<'a> {
    source: &'a str,
    port: &'a str,
}

fn validate_slots(
    registry: &CapabilityRegistry,
    index: &NodeIndex<'_>,
    at: &PortLocation<'_>,
    slots: &[Value],
    errors: &mut Vec<ValidationIssue>,
) {
    for (slot, targets) in slots.iter().enumerate() {
        let targets = match targets {
            // Hole left by a sparse output index.
            Value::Null => continue,
            Value::Array(targets) => targets,
            _ => {
                errors.push(ValidationIssue::new(format!(
                    "Port \"{}.{}[{}]\" must be an array of targets",
                    at.source, at.port, slot
                )));
                continue;
            }
        };

        for (ti, target) in targets.iter().enumerate() {
            let Value::Object(target) = target else {
                errors.push(ValidationIssue::new(format!(
                    "Invalid target at {}.{}[{}][{}]",
                    at.source, at.port, slot, ti
                )));
                continue;
            };
            validate_target(registry, index, at, slot, target, errors);
        }
    }
}

fn validate_target(
    registry: &CapabilityRegistry,
    index: &NodeIndex<'_>,
    at: &PortLocation<'_>,
    slot: usize,
    target: &Map<String, Value>,
    errors: &mut Vec<ValidationIssue>,
) {
    let target_name = target.get("node").and_then(Value::as_str);
    let display_name = target_name.unwrap_or("<missing>");

    match target_name.and_then(|name| index.get(name)) {
        None => errors.push(ValidationIssue::new(format!(
            "Target node not found: {} (from {}.{})",
            display_name, at.source, at.port
        ))),
        Some(node) => {
            let input = target.get("type").and_then(Value::as_str);
            let accepted = input.is_some_and(|port| registry.lookup(&node.node_type).has_input(port));
            if !accepted {
                errors.push(ValidationIssue::new(format!(
                    "Target node \"{}\" (type {}) does not accept input port \"{}\"",
                    display_name,
                    node.node_type,
                    input.unwrap_or("<missing>")
                )));
            }
        }
    }

    if target.get("index").and_then(Value::as_u64).is_none() {
        errors.push(ValidationIssue::new(format!(
            "Target index must be a non-negative integer at {}.{}[{}] → {}",
            at.source, at.port, slot, display_name
        )));
    }
}
