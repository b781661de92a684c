//! Template expression helpers and the `$('Node Name')` reference scanner.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NODE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\$\(\s*['"]([^'"]+)['"]\s*\)"#).expect("node reference pattern is valid")
});

/// `={{ ... }}` after trimming.
pub fn is_expression(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.starts_with("={{") && trimmed.ends_with("}}")
}

/// Turn `{{ ... }}` or a bare string into an `=`-prefixed expression.
pub fn normalize_expression(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.starts_with("={{") && trimmed.ends_with("}}") {
        return value.to_string();
    }
    if trimmed.starts_with("{{") && trimmed.ends_with("}}") {
        return format!("={}", trimmed);
    }
    if trimmed.starts_with('=') {
        return value.to_string();
    }
    format!("={}", value)
}

/// Every node name referenced in `text`, in order of appearance.
pub fn find_node_refs_in_string(text: &str) -> Vec<String> {
    NODE_REF
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Distinct node names referenced anywhere in `tree`, in first-seen order.
///
/// The walk uses an explicit stack, so nesting depth is bounded by heap, not
/// by the call stack.
pub fn find_node_references(tree: &Value) -> IndexSet<String> {
    let mut refs = IndexSet::new();
    let mut stack = vec![tree];

    while let Some(value) = stack.pop() {
        match value {
            Value::String(s) => refs.extend(find_node_refs_in_string(s)),
            // Reversed so that earlier siblings are visited first.
            Value::Array(items) => stack.extend(items.iter().rev()),
            Value::Object(map) => stack.extend(map.values().rev()),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    refs
}
