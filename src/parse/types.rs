//! Rust types for the workflow document accepted by the external engine.
//!
//! Nodes and connections arrive as caller-authored JSON, so the node shape is
//! lenient: missing or non-string `id`/`name`/`type` deserialize as strings
//! (numbers keep their text, anything else is empty) and `position` is kept
//! as raw JSON. The validators, not serde, decide whether a document is
//! acceptable.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Port used when an edge names none.
pub const MAIN_PORT: &str = "main";

/// Output slots a single port may have. Edges beyond it are rejected before
/// anything is allocated.
pub const MAX_OUTPUT_SLOTS: usize = 1024;

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub node_type: String,
    #[serde(default)]
    pub position: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Everything the core does not interpret (`typeVersion`, `credentials`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            position: Value::Array(vec![Value::from(0), Value::from(0)]),
            parameters: None,
            extra: Map::new(),
        }
    }

    /// Decode one caller-authored node without failing. A value that is not
    /// an object decodes as an empty node, which the validators then report.
    pub fn from_raw(raw: &Value) -> Self {
        Node::deserialize(raw).unwrap_or_default()
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Value::Array(vec![Value::from(x), Value::from(y)]);
        self
    }

    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// The `[x, y]` pair, if `position` is exactly two numbers.
    pub fn position_pair(&self) -> Option<(f64, f64)> {
        match self.position.as_array()?.as_slice() {
            [x, y] => Some((x.as_f64()?, y.as_f64()?)),
            _ => None,
        }
    }
}

/// Numbers keep their text; `null` and other non-strings become empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

// =============================================================================
// EDGE DSL
// =============================================================================

/// High-level, human-authored link between two nodes. Only the builder
/// consumes edges; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_index: Option<usize>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
            from_port: None,
            to_port: None,
            from_index: None,
            to_index: None,
        }
    }

    pub fn from_port(mut self, port: impl Into<String>) -> Self {
        self.from_port = Some(port.into());
        self
    }

    pub fn to_port(mut self, port: impl Into<String>) -> Self {
        self.to_port = Some(port.into());
        self
    }

    pub fn from_index(mut self, index: usize) -> Self {
        self.from_index = Some(index);
        self
    }

    pub fn to_index(mut self, index: usize) -> Self {
        self.to_index = Some(index);
        self
    }

    pub fn source_port(&self) -> &str {
        self.from_port.as_deref().unwrap_or(MAIN_PORT)
    }

    /// The target port inherits the source port when omitted.
    pub fn target_port(&self) -> &str {
        self.to_port.as_deref().unwrap_or_else(|| self.source_port())
    }

    pub fn source_slot(&self) -> usize {
        self.from_index.unwrap_or(0)
    }

    pub fn target_slot(&self) -> usize {
        self.to_index.unwrap_or(0)
    }
}

// =============================================================================
// CONNECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(rename = "type")]
    pub port: String,
    pub index: usize,
}

/// Target lists indexed by output slot. `None` is a hole: a slot below the
/// highest written index that no edge ever touched.
pub type PortConnections = Vec<Option<Vec<ConnectionTarget>>>;

/// Output port name → slots.
pub type NodeConnections = IndexMap<String, PortConnections>;

/// Source node name → output ports. Key order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Connections(pub IndexMap<String, NodeConnections>);

impl Connections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn ports(&self, source: &str) -> Option<&NodeConnections> {
        self.0.get(source)
    }

    /// Targets written at `[source][port][slot]`; empty for holes and absent keys.
    pub fn targets(&self, source: &str, port: &str, slot: usize) -> &[ConnectionTarget] {
        self.0
            .get(source)
            .and_then(|ports| ports.get(port))
            .and_then(|slots| slots.get(slot))
            .and_then(|targets| targets.as_deref())
            .unwrap_or(&[])
    }

    /// Target list at `[source][port][slot]`, creating intermediate maps and
    /// the slot itself. Slots skipped on the way stay holes. `None` when
    /// `slot` is not below [`MAX_OUTPUT_SLOTS`].
    pub(crate) fn slot_mut(&mut self, source: &str, port: &str, slot: usize) -> Option<&mut Vec<ConnectionTarget>> {
        let len = slot.checked_add(1).filter(|len| *len <= MAX_OUTPUT_SLOTS)?;
        let slots = self
            .0
            .entry(source.to_string())
            .or_default()
            .entry(port.to_string())
            .or_default();
        if slots.len() < len {
            slots.resize(len, None);
        }
        Some(slots[slot].get_or_insert_with(Vec::new))
    }

    /// The raw JSON form consumed by the engine and by the graph validator.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveDataMode {
    All,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_execution_progress: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_manual_executions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_data_error_execution: Option<SaveDataMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_data_success_execution: Option<SaveDataMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_timeout: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_workflow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_order: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings applied when a caller supplies none.
impl Default for WorkflowSettings {
    fn default() -> Self {
        WorkflowSettings {
            save_execution_progress: Some(true),
            save_manual_executions: Some(true),
            save_data_error_execution: Some(SaveDataMode::All),
            save_data_success_execution: Some(SaveDataMode::All),
            execution_timeout: Some(3600.0),
            error_workflow: None,
            timezone: Some("UTC".into()),
            execution_order: Some("v1".into()),
            extra: Map::new(),
        }
    }
}

// =============================================================================
// DRAFT
// =============================================================================

/// What a caller hands over before a workflow is accepted: nodes plus either
/// explicit connections or an edge list. Nodes, `connections` and `settings`
/// stay raw so that malformed shapes reach the shape validator as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}
