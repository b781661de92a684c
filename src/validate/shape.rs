//! Shape validation: the workflow document against the fixed schema.

use serde_json::Value;

use super::schema::{JsonSchemaChecker, SchemaChecker, SchemaError};
use super::{ValidationIssue, ValidationResult};

/// Check `workflow` against the builtin workflow schema.
pub fn validate_workflow_shape(workflow: &Value) -> ValidationResult {
    validate_workflow_shape_with(JsonSchemaChecker::workflow(), workflow)
}

/// Check `workflow` with any schema checker and convert its findings.
pub fn validate_workflow_shape_with(checker: &dyn SchemaChecker, workflow: &Value) -> ValidationResult {
    let errors: Vec<ValidationIssue> = checker.check(workflow).into_iter().map(ValidationIssue::from).collect();
    tracing::debug!(issues = errors.len(), "validated workflow shape");
    ValidationResult::from_issues(errors)
}

impl From<SchemaError> for ValidationIssue {
    /// Root-level findings have no instance path, so they fall back to the
    /// schema path.
    fn from(e: SchemaError) -> Self {
        let path = if e.instance_path.is_empty() {
            e.schema_path
        } else {
            e.instance_path
        };
        let message = if e.message.is_empty() {
            "Invalid".to_string()
        } else {
            e.message
        };
        ValidationIssue::at(path, message)
    }
}
