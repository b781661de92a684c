//! Error types for the fallible phases.
//!
//! Validation never fails: its findings are `ValidationIssue` data. Only JSON
//! decoding, schema compilation and connection building return `Err`.

use thiserror::Error;

/// First invalid edge found while building connections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Edge refers to unknown source node: {node}")]
    UnknownSourceNode { node: String },

    #[error("Edge refers to unknown target node: {node}")]
    UnknownTargetNode { node: String },

    #[error("Node \"{node}\" (type {node_type}) does not support output port \"{port}\"")]
    UnsupportedOutputPort {
        node: String,
        node_type: String,
        port: String,
    },

    #[error("Node \"{node}\" (type {node_type}) does not support input port \"{port}\"")]
    UnsupportedInputPort {
        node: String,
        node_type: String,
        port: String,
    },

    #[error("Node \"{node}\" output index {index} is out of range (at most {max})")]
    OutputIndexOutOfRange { node: String, index: usize, max: usize },
}

impl BuildError {
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::UnknownSourceNode { .. } => "B001",
            BuildError::UnknownTargetNode { .. } => "B002",
            BuildError::UnsupportedOutputPort { .. } => "B003",
            BuildError::UnsupportedInputPort { .. } => "B004",
            BuildError::OutputIndexOutOfRange { .. } => "B005",
        }
    }

    /// Name of the node the failing edge points at.
    pub fn node(&self) -> &str {
        match self {
            BuildError::UnknownSourceNode { node }
            | BuildError::UnknownTargetNode { node }
            | BuildError::UnsupportedOutputPort { node, .. }
            | BuildError::UnsupportedInputPort { node, .. }
            | BuildError::OutputIndexOutOfRange { node, .. } => node,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid workflow JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Validation requires a non-empty nodes array")]
    EmptyNodes,

    #[error("Invalid JSON schema: {0}")]
    InvalidSchema(String),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Json(_) => "P001",
            Error::Build(e) => e.code(),
            Error::EmptyNodes => "D001",
            Error::InvalidSchema(_) => "S001",
        }
    }
}
