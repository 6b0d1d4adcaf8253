//! Structural validation of software-management documents.
//!
//! # Responsibilities
//! - Check required fields and JSON types before any typed decode
//! - Report every violation with the path that caused it
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Unknown fields are allowed at every level
//! - Pure function: `&Value → Result<(), Vec<SchemaViolation>>`

use serde_json::{Map, Value};
use thiserror::Error;

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct SchemaViolation {
    /// Location of the offending value, e.g. `$.items[0].config_files`.
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a desired-configuration document.
pub fn validate_document(document: &Value) -> Result<(), Vec<SchemaViolation>> {
    let mut errors = Vec::new();

    match document.as_object() {
        Some(root) => check_root(root, &mut errors),
        None => errors.push(SchemaViolation::new("$", format!("expected object, found {}", kind(document)))),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_root(root: &Map<String, Value>, errors: &mut Vec<SchemaViolation>) {
    require(root, "$", "enabled", Value::is_boolean, "boolean", errors);
    require(root, "$", "version", Value::is_string, "string", errors);

    if let Some(items) = require(root, "$", "items", Value::is_array, "array", errors) {
        for (i, item) in items.as_array().into_iter().flatten().enumerate() {
            let path = format!("$.items[{i}]");
            match item.as_object() {
                Some(item) => check_item(item, &path, errors),
                None => errors.push(SchemaViolation::new(&path, format!("expected object, found {}", kind(item)))),
            }
        }
    }
}

fn check_item(item: &Map<String, Value>, path: &str, errors: &mut Vec<SchemaViolation>) {
    optional(item, path, "package", Value::is_string, "string", errors);

    if let Some(files) = require(item, path, "config_files", Value::is_array, "array", errors) {
        for (i, file) in files.as_array().into_iter().flatten().enumerate() {
            let path = format!("{path}.config_files[{i}]");
            match file.as_object() {
                Some(file) => {
                    require(file, &path, "config_template", Value::is_string, "string", errors);
                    require(file, &path, "config_location", Value::is_string, "string", errors);
                }
                None => errors.push(SchemaViolation::new(&path, format!("expected object, found {}", kind(file)))),
            }
        }
    }

    if let Some(params) = optional(item, path, "parameters", Value::is_array, "array", errors) {
        for (i, param) in params.as_array().into_iter().flatten().enumerate() {
            let path = format!("{path}.parameters[{i}]");
            match param.as_object() {
                Some(param) => {
                    optional(param, &path, "key", Value::is_string, "string", errors);
                    optional(param, &path, "value", Value::is_string, "string", errors);
                }
                None => errors.push(SchemaViolation::new(&path, format!("expected object, found {}", kind(param)))),
            }
        }
    }
}

/// Check a required field. Returns the value only if it has the right type.
fn require<'a>(
    object: &'a Map<String, Value>,
    parent: &str,
    field: &str,
    is_type: fn(&Value) -> bool,
    expected: &str,
    errors: &mut Vec<SchemaViolation>,
) -> Option<&'a Value> {
    if object.contains_key(field) {
        optional(object, parent, field, is_type, expected, errors)
    } else {
        errors.push(SchemaViolation::new(&format!("{parent}.{field}"), "required field missing"));
        None
    }
}

fn optional<'a>(
    object: &'a Map<String, Value>,
    parent: &str,
    field: &str,
    is_type: fn(&Value) -> bool,
    expected: &str,
    errors: &mut Vec<SchemaViolation>,
) -> Option<&'a Value> {
    let value = object.get(field)?;
    if is_type(value) {
        Some(value)
    } else {
        errors.push(SchemaViolation::new(
            &format!("{parent}.{field}"),
            format!("expected {expected}, found {}", kind(value)),
        ));
        None
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
