//! Integration tests for the capability registry.

use workflow_graph::registry::{
    AI_LANGUAGE_MODEL_PORT, AI_OUTPUT_PARSER_PORT, LANGCHAIN_AGENT, LANGCHAIN_OPENAI_CHAT_MODEL,
    LANGCHAIN_STRUCTURED_OUTPUT_PARSER,
};
use workflow_graph::{Capabilities, CapabilityRegistry, capabilities_of};

#[test]
fn seeded_types() {
    let registry = CapabilityRegistry::builtin();
    assert_eq!(
        registry.node_types(),
        vec![LANGCHAIN_AGENT, LANGCHAIN_OPENAI_CHAT_MODEL, LANGCHAIN_STRUCTURED_OUTPUT_PARSER]
    );
    let model = capabilities_of(LANGCHAIN_OPENAI_CHAT_MODEL);
    assert!(model.has_output(AI_LANGUAGE_MODEL_PORT) && model.has_output("main"));
    assert!(!model.has_input(AI_LANGUAGE_MODEL_PORT));
    let parser = capabilities_of(LANGCHAIN_STRUCTURED_OUTPUT_PARSER);
    assert!(parser.has_output(AI_OUTPUT_PARSER_PORT));
}

#[test]
fn lookup_is_total() {
    for node_type in ["", "n8n-nodes-base.httpRequest", "made.up"] {
        assert_eq!(capabilities_of(node_type), &Capabilities::main_only());
    }
}

#[test]
fn capabilities_serialize_in_declared_order() {
    let json = serde_json::to_value(capabilities_of(LANGCHAIN_AGENT)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "outputs": ["main"],
            "inputs": ["main", "ai_languageModel", "ai_outputParser"]
        })
    );
}

#[test]
fn extension_overrides_existing_entry() {
    let registry = CapabilityRegistry::builtin()
        .extended(&format!(r#"{{"{}": {{"outputs": ["main"], "inputs": ["main", "ai_tool"]}}}}"#, LANGCHAIN_AGENT))
        .unwrap();
    let agent = registry.lookup(LANGCHAIN_AGENT);
    assert!(agent.has_input("ai_tool"));
    assert!(!agent.has_input(AI_LANGUAGE_MODEL_PORT));
}
