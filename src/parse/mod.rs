//! Parse phase: caller JSON → Rust types.

pub mod types;

pub use types::*;

use crate::error::Error;

/// Deserialize a JSON array of nodes. Only the array itself must be well
/// formed; each element decodes leniently via [`Node::from_raw`].
pub fn parse_nodes(json: &str) -> Result<Vec<Node>, Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(raw.iter().map(Node::from_raw).collect())
}

/// Deserialize a JSON array of edges.
pub fn parse_edges(json: &str) -> Result<Vec<Edge>, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Deserialize a `{name?, nodes, connections?, edges?, settings?}` draft.
pub fn parse_draft(json: &str) -> Result<WorkflowDraft, Error> {
    Ok(serde_json::from_str(json)?)
}
