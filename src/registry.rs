//! Node capability registry: which ports a node type may emit on and accept.
//!
//! The builder and the graph validator both consult the same table, so they
//! always agree on what a legal port is. A registry is never mutated after
//! construction; deployments that need more types build an extended copy once
//! at startup and pass it to the `*_with` entry points.

use std::collections::HashMap;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::parse::types::MAIN_PORT;

pub const LANGCHAIN_AGENT: &str = "@n8n/n8n-nodes-langchain.agent";
pub const LANGCHAIN_OPENAI_CHAT_MODEL: &str = "@n8n/n8n-nodes-langchain.lmChatOpenAi";
pub const LANGCHAIN_STRUCTURED_OUTPUT_PARSER: &str = "@n8n/n8n-nodes-langchain.outputParserStructured";

pub const AI_LANGUAGE_MODEL_PORT: &str = "ai_languageModel";
pub const AI_OUTPUT_PARSER_PORT: &str = "ai_outputParser";

static BUILTIN: Lazy<CapabilityRegistry> = Lazy::new(CapabilityRegistry::seeded);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub outputs: IndexSet<String>,
    pub inputs: IndexSet<String>,
}

impl Capabilities {
    pub fn new<'a>(
        outputs: impl IntoIterator<Item = &'a str>,
        inputs: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Capabilities {
            outputs: outputs.into_iter().map(String::from).collect(),
            inputs: inputs.into_iter().map(String::from).collect(),
        }
    }

    /// `main` in, `main` out.
    pub fn main_only() -> Self {
        Self::new([MAIN_PORT], [MAIN_PORT])
    }

    pub fn has_output(&self, port: &str) -> bool {
        self.outputs.contains(port)
    }

    pub fn has_input(&self, port: &str) -> bool {
        self.inputs.contains(port)
    }
}

#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    types: HashMap<String, Capabilities>,
    fallback: Capabilities,
}

impl CapabilityRegistry {
    /// The process-wide table seeded with the known multi-port node types.
    pub fn builtin() -> &'static CapabilityRegistry {
        &BUILTIN
    }

    /// A registry that knows no types: everything resolves to `main` only.
    pub fn empty() -> Self {
        CapabilityRegistry {
            types: HashMap::new(),
            fallback: Capabilities::main_only(),
        }
    }

    fn seeded() -> Self {
        let mut types = HashMap::new();
        types.insert(
            LANGCHAIN_AGENT.to_string(),
            Capabilities::new(
                [MAIN_PORT],
                [MAIN_PORT, AI_LANGUAGE_MODEL_PORT, AI_OUTPUT_PARSER_PORT],
            ),
        );
        types.insert(
            LANGCHAIN_OPENAI_CHAT_MODEL.to_string(),
            Capabilities::new([AI_LANGUAGE_MODEL_PORT, MAIN_PORT], [MAIN_PORT]),
        );
        types.insert(
            LANGCHAIN_STRUCTURED_OUTPUT_PARSER.to_string(),
            Capabilities::new([AI_OUTPUT_PARSER_PORT, MAIN_PORT], [MAIN_PORT]),
        );
        CapabilityRegistry {
            types,
            fallback: Capabilities::main_only(),
        }
    }

    /// Parse a `{ "<node type>": {"outputs": [...], "inputs": [...]} }` table
    /// on top of an empty registry.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Self::empty().extended(json)
    }

    /// A copy of this registry with the entries of `json` added. Entries for
    /// types already present replace them.
    pub fn extended(&self, json: &str) -> Result<Self, Error> {
        let overrides: HashMap<String, Capabilities> = serde_json::from_str(json)?;
        let mut registry = self.clone();
        tracing::debug!(types = overrides.len(), "extending capability registry");
        registry.types.extend(overrides);
        Ok(registry)
    }

    /// Capabilities for `node_type`; unknown types get the `main`-only fallback.
    pub fn lookup(&self, node_type: &str) -> &Capabilities {
        self.types.get(node_type).unwrap_or(&self.fallback)
    }

    pub fn is_known(&self, node_type: &str) -> bool {
        self.types.contains_key(node_type)
    }

    /// Explicitly registered node types, sorted.
    pub fn node_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.types.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Capabilities of `node_type` in the builtin registry.
pub fn capabilities_of(node_type: &str) -> &'static Capabilities {
    CapabilityRegistry::builtin().lookup(node_type)
}
