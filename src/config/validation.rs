//! Contract schema validation.
//!
//! Runs over the raw JSON document rather than the typed `Config` so that every
//! violated constraint can be reported in a single pass, including type
//! mismatches that would otherwise stop deserialization at the first problem.

use serde_json::{Map, Value};

use crate::rules::PATTERN_IDS;

use super::model::{
    CANONICAL_ROLES, VALID_MODES, VALID_MODULE_PATTERNS, VALID_NAMING_SCHEMAS, VALID_SIDE_EFFECTS,
    VALID_STATE_OWNERSHIP,
};

/// Validates a parsed contract document and returns every schema error found.
///
/// An empty result means the document can be decoded into a `Config`.
#[must_use]
pub fn validate_contract(raw: &Value) -> Vec<String> {
    let Some(doc) = raw.as_object() else {
        return vec![format!(
            "contract must be a JSON object, got {}",
            json_type_name(raw)
        )];
    };

    let mut errors = Vec::new();
    validate_version(doc, &mut errors);
    validate_languages(doc, &mut errors);
    validate_enum_field(doc, "mode", VALID_MODES, true, &mut errors);
    validate_enum_field(doc, "modulePattern", VALID_MODULE_PATTERNS, false, &mut errors);
    validate_enum_field(doc, "stateOwnership", VALID_STATE_OWNERSHIP, false, &mut errors);
    validate_enum_field(doc, "sideEffects", VALID_SIDE_EFFECTS, false, &mut errors);
    validate_enum_field(doc, "namingSchema", VALID_NAMING_SCHEMAS, false, &mut errors);
    validate_enum_array(doc, "allowedPatterns", PATTERN_IDS, &mut errors);
    validate_enum_array(doc, "forbiddenPatterns", PATTERN_IDS, &mut errors);
    validate_enum_array(doc, "roles", CANONICAL_ROLES, &mut errors);
    errors
}

fn validate_version(doc: &Map<String, Value>, errors: &mut Vec<String>) {
    match doc.get("version") {
        None => errors.push("missing required field 'version'".to_string()),
        Some(Value::String(v)) if v.trim().is_empty() => {
            errors.push("'version' must not be empty".to_string());
        }
        Some(Value::String(_)) => {}
        Some(other) => errors.push(format!(
            "'version' must be a string, got {}",
            json_type_name(other)
        )),
    }
}

fn validate_languages(doc: &Map<String, Value>, errors: &mut Vec<String>) {
    match doc.get("languages") {
        None => errors.push("missing required field 'languages'".to_string()),
        Some(Value::Array(items)) if items.is_empty() => {
            errors.push("'languages' must list at least one language".to_string());
        }
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    errors.push(format!(
                        "languages[{i}] must be a string, got {}",
                        json_type_name(item)
                    ));
                }
            }
        }
        Some(other) => errors.push(format!(
            "'languages' must be an array of strings, got {}",
            json_type_name(other)
        )),
    }
}

fn validate_enum_field(
    doc: &Map<String, Value>,
    field: &str,
    valid: &[&str],
    required: bool,
    errors: &mut Vec<String>,
) {
    match doc.get(field) {
        None if required => errors.push(format!("missing required field '{field}'")),
        None => {}
        Some(Value::String(v)) if valid.contains(&v.as_str()) => {}
        Some(Value::String(v)) => errors.push(format!(
            "'{field}' has invalid value '{v}'. Valid values: {}",
            valid.join(", ")
        )),
        Some(other) => errors.push(format!(
            "'{field}' must be a string, got {}",
            json_type_name(other)
        )),
    }
}

fn validate_enum_array(
    doc: &Map<String, Value>,
    field: &str,
    valid: &[&str],
    errors: &mut Vec<String>,
) {
    let Some(value) = doc.get(field) else {
        return;
    };
    let Value::Array(items) = value else {
        errors.push(format!(
            "'{field}' must be an array of strings, got {}",
            json_type_name(value)
        ));
        return;
    };
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(v) if valid.contains(&v.as_str()) => {}
            Value::String(v) => errors.push(format!(
                "{field}[{i}] has invalid value '{v}'. Valid values: {}",
                valid.join(", ")
            )),
            other => errors.push(format!(
                "{field}[{i}] must be a string, got {}",
                json_type_name(other)
            )),
        }
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
