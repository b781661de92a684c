//! The fixed workflow schema and the checker seam shape validation runs
//! through.
//!
//! The builtin checker compiles the schema with `jsonschema` once and reports
//! every violation with a JSON-pointer instance path and a `#/...` schema
//! path.

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::{Value, json};

use crate::error::Error;

static WORKFLOW: Lazy<JsonSchemaChecker> = Lazy::new(|| {
    JsonSchemaChecker::compile(&workflow_schema()).expect("workflow schema is a valid JSON schema")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// JSON pointer into the checked document; empty for the root.
    pub instance_path: String,
    /// Location of the violated keyword inside the schema.
    pub schema_path: String,
    pub message: String,
}

/// Anything that can check a document against a schema.
pub trait SchemaChecker {
    fn check(&self, instance: &Value) -> Vec<SchemaError>;
}

/// A compiled JSON schema.
pub struct JsonSchemaChecker {
    validator: Validator,
}

impl JsonSchemaChecker {
    /// The workflow document schema used by shape validation.
    pub fn workflow() -> &'static JsonSchemaChecker {
        &WORKFLOW
    }

    pub fn compile(schema: &Value) -> Result<Self, Error> {
        let validator = jsonschema::validator_for(schema).map_err(|e| Error::InvalidSchema(e.to_string()))?;
        Ok(JsonSchemaChecker { validator })
    }
}

impl SchemaChecker for JsonSchemaChecker {
    fn check(&self, instance: &Value) -> Vec<SchemaError> {
        self.validator
            .iter_errors(instance)
            .map(|e| SchemaError {
                instance_path: e.instance_path.to_string(),
                schema_path: format!("#{}", e.schema_path),
                message: e.to_string(),
            })
            .collect()
    }
}

/// Required top-level fields and node fields; unlisted properties are allowed
/// everywhere.
pub fn workflow_schema() -> Value {
    let node = json!({
        "type": "object",
        "required": ["id", "name", "type", "position"],
        "properties": {
            "id": {"type": "string"},
            "name": {"type": "string"},
            "type": {"type": "string"},
            "typeVersion": {"type": "number"},
            "position": {
                "type": "array",
                "items": {"type": "number"},
                "minItems": 2,
                "maxItems": 2
            },
            "parameters": {"type": "object"},
            "credentials": {"type": "object"}
        }
    });
    let settings = json!({
        "type": "object",
        "properties": {
            "saveExecutionProgress": {"type": "boolean"},
            "saveManualExecutions": {"type": "boolean"},
            "saveDataErrorExecution": {"type": "string", "enum": ["all", "none"]},
            "saveDataSuccessExecution": {"type": "string", "enum": ["all", "none"]},
            "executionTimeout": {"type": "number"},
            "errorWorkflow": {"type": "string"},
            "timezone": {"type": "string"},
            "executionOrder": {"type": "string"}
        }
    });
    json!({
        "type": "object",
        "required": ["name", "nodes", "connections", "settings"],
        "properties": {
            "name": {"type": "string"},
            "nodes": {"type": "array", "items": node},
            "connections": {"type": "object"},
            "settings": settings
        }
    })
}
