//! Workflow graph construction and validation.
//!
//! Builds the engine's nested, port-indexed `connections` structure from a
//! flat edge list and validates whole workflow graphs (nodes, connections and
//! `$('Node')` expression references) before they are accepted.

pub mod build;
pub mod error;
pub mod expression;
pub mod parse;
pub mod pipeline;
pub mod registry;
pub mod validate;
pub mod wasm;

pub use build::{build_connections, build_connections_with};
pub use error::{BuildError, Error};
pub use parse::types::{ConnectionTarget, Connections, Edge, Node, WorkflowDraft, WorkflowSettings};
pub use registry::{Capabilities, CapabilityRegistry, capabilities_of};
pub use validate::{
    ValidationIssue, ValidationResult, validate_nodes_and_connections, validate_nodes_and_connections_with,
    validate_workflow_shape,
};
