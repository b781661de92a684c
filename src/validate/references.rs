//! Expression cross-check: every `$('Name')` in node parameters must name a node.

use crate::expression::find_node_references;
use crate::parse::types::Node;

use super::ValidationIssue;
use super::node_rules::NodeIndex;

pub fn validate_expression_refs(nodes: &[Node], index: &NodeIndex<'_>, errors: &mut Vec<ValidationIssue>) {
    for node in nodes {
        let Some(parameters) = &node.parameters else {
            continue;
        };
        for reference in find_node_references(parameters) {
            if !index.contains(&reference) {
                errors.push(ValidationIssue::new(format!(
                    "Node \"{}\" has expression reference to unknown node \"{}\"",
                    node.name, reference
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn one_issue_per_distinct_dangling_reference() {
        let nodes = vec![
            Node::new("1", "Fetch", "x"),
            Node::new("2", "Use", "x").with_parameters(json!({
                "a": "={{ $('Fetch').item.json.id }}",
                "b": ["{{ $('Gone').item }}", "{{ $(\"Gone\").first() }}"]
            })),
        ];
        let index = NodeIndex::new(&nodes);
        let mut errors = Vec::new();
        validate_expression_refs(&nodes, &index, &mut errors);
        assert_eq!(
            errors,
            vec![ValidationIssue::new(
                "Node \"Use\" has expression reference to unknown node \"Gone\""
            )]
        );
    }
}
