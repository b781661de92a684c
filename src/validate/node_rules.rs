//! Per-node rules: required name/id, uniqueness, position shape.

use std::collections::{HashMap, HashSet};

use crate::parse::types::Node;

use super::ValidationIssue;

/// Name lookup shared by the later checks. The first node with a given name
/// is the one connections resolve to.
pub struct NodeIndex<'a> {
    by_name: HashMap<&'a str, &'a Node>,
}

impl<'a> NodeIndex<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        let mut by_name = HashMap::with_capacity(nodes.len());
        for node in nodes {
            by_name.entry(node.name.as_str()).or_insert(node);
        }
        NodeIndex { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a Node> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }
}

/// Check every node and return the name index. Only second and later
/// occurrences of a name or id are flagged.
pub fn validate_nodes<'a>(nodes: &'a [Node], errors: &mut Vec<ValidationIssue>) -> NodeIndex<'a> {
    let mut names = HashSet::new();
    let mut ids = HashSet::new();

    for node in nodes {
        if node.name.is_empty() {
            errors.push(ValidationIssue::new("Node missing name"));
        }
        if node.id.is_empty() {
            errors.push(ValidationIssue::new(format!("Node \"{}\" missing id", node.name)));
        }
        if !node.name.is_empty() && !names.insert(node.name.as_str()) {
            errors.push(ValidationIssue::new(format!("Duplicate node name: {}", node.name)));
        }
        if !node.id.is_empty() && !ids.insert(node.id.as_str()) {
            errors.push(ValidationIssue::new(format!("Duplicate node id: {}", node.id)));
        }
        if node.position_pair().is_none() {
            errors.push(ValidationIssue::new(format!(
                "Node \"{}\" has invalid position",
                node.name
            )));
        }
    }

    NodeIndex::new(nodes)
}
