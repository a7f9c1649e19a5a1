//! Schema validator and normalizer
//!
//! Validation semantics:
//! - Declared fields are processed in declaration order
//! - Every field failure is collected; validation never stops at the first one
//! - Defaults (static or thunk) are filled in and checked against the field schema
//! - `null` counts as absent
//! - Open objects pass undeclared keys through, closed objects reject them
//! - The input is never mutated; the output is a fresh value
//!
//! A default that cannot be produced, or that fails its own schema, is a bug in
//! the schema definition and aborts validation with a FATAL error.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{FieldPresence, FieldSpec, ValueSchema};
use crate::observability::Event;

/// Validates `input` against `schema` and returns the normalized value.
///
/// # Errors
///
/// Returns `SchemaError` if:
/// - Any field violates the schema (EK_SCHEMA_VALIDATION_FAILED), with one
///   detail per failing field in declaration order
/// - A default could not be produced (EK_SCHEMA_DEFAULT_FAILED)
pub fn validate(schema: &ValueSchema, input: &Value) -> SchemaResult<Value> {
    let mut errors = Vec::new();
    let output = process(schema, input, "", &mut errors).map_err(|err| {
        tracing::error!(event = %Event::DefaultFailed, error = %err, "schema default failed");
        err
    })?;

    match output {
        Some(value) if errors.is_empty() => Ok(value),
        _ => {
            tracing::debug!(
                event = %Event::ValidationFailed,
                failures = errors.len(),
                "schema validation failed"
            );
            Err(SchemaError::validation_failed(errors))
        }
    }
}

/// Like [`validate`], labelling any error with what was being validated.
pub fn as_raw(label: &str, schema: &ValueSchema, input: &Value) -> SchemaResult<Value> {
    validate(schema, input).map_err(|err| err.with_label(label))
}

/// Processes one value. Returns `Ok(None)` when the value is invalid, in which
/// case at least one detail has been pushed to `errors`.
fn process(
    schema: &ValueSchema,
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationDetails>,
) -> SchemaResult<Option<Value>> {
    match schema {
        ValueSchema::Any => Ok(Some(value.clone())),
        ValueSchema::String => Ok(expect_type(value.is_string(), schema, value, path, errors)),
        ValueSchema::Boolean => Ok(expect_type(value.is_boolean(), schema, value, path, errors)),
        ValueSchema::Number => Ok(expect_type(value.is_number(), schema, value, path, errors)),
        ValueSchema::Integer => Ok(expect_type(
            value.is_i64() || value.is_u64(),
            schema,
            value,
            path,
            errors,
        )),
        ValueSchema::ArrayOf(element) => {
            let Some(items) = value.as_array() else {
                errors.push(type_error(path, schema, value));
                return Ok(None);
            };

            let mut out = Vec::with_capacity(items.len());
            let mut valid = true;
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                match process(element, item, &item_path, errors)? {
                    Some(v) => out.push(v),
                    None => valid = false,
                }
            }

            Ok(valid.then_some(Value::Array(out)))
        }
        ValueSchema::ObjOf { fields, closed } => {
            let Some(obj) = value.as_object() else {
                errors.push(type_error(path, schema, value));
                return Ok(None);
            };
            process_fields(fields, obj, path, *closed, None, errors)
        }
        ValueSchema::Choose { tag, branches } => {
            let Some(obj) = value.as_object() else {
                errors.push(type_error(path, schema, value));
                return Ok(None);
            };

            let tag_path = make_path(path, tag);
            let selected = obj
                .get(tag)
                .and_then(Value::as_str)
                .and_then(|name| branches.iter().find(|(branch, _)| branch == name));

            let Some((_, fields)) = selected else {
                let actual = match obj.get(tag) {
                    None | Some(Value::Null) => "missing".to_string(),
                    Some(Value::String(s)) => format!("'{}'", s),
                    Some(other) => json_type_name(other).to_string(),
                };
                errors.push(ValidationDetails::unknown_variant(
                    tag_path,
                    &schema.branch_names(),
                    actual,
                ));
                return Ok(None);
            };

            let output = process_fields(fields, obj, path, false, Some(tag), errors)?;
            Ok(output.map(|mut out| {
                if let (Value::Object(map), Some(tag_value)) = (&mut out, obj.get(tag)) {
                    map.entry(tag.clone()).or_insert_with(|| tag_value.clone());
                }
                out
            }))
        }
        ValueSchema::Custom { name, validate: check } => match check(value) {
            Ok(v) => Ok(Some(v)),
            Err(reason) => {
                errors.push(ValidationDetails::rejected(display_path(path), name, reason));
                Ok(None)
            }
        },
    }
}

/// Processes the declared fields of an object.
fn process_fields(
    fields: &[FieldSpec],
    obj: &Map<String, Value>,
    path: &str,
    closed: bool,
    tag: Option<&str>,
    errors: &mut Vec<ValidationDetails>,
) -> SchemaResult<Option<Value>> {
    let mut out = Map::new();
    let mut valid = true;

    for field in fields {
        let field_path = make_path(path, &field.key);
        let raw = obj.get(&field.key).filter(|v| !v.is_null());

        let resolved = match (&field.presence, raw) {
            (FieldPresence::Output(constant), _) => Some(constant.clone()),
            (_, Some(value)) => process(&field.schema, value, &field_path, errors)?,
            (FieldPresence::Strict, None) => {
                errors.push(ValidationDetails::missing_field(field_path));
                valid = false;
                continue;
            }
            (FieldPresence::AsOption, None) => continue,
            (FieldPresence::Defaulted(default), None) => {
                Some(resolve_default(field, default, &field_path)?)
            }
            (FieldPresence::DefaultedThunk(thunk), None) => {
                let default = thunk()
                    .map_err(|reason| SchemaError::default_failed(&field_path, reason))?;
                Some(resolve_default(field, &default, &field_path)?)
            }
        };

        match resolved {
            Some(value) => {
                out.insert(field.output_key.clone(), value);
            }
            None => valid = false,
        }
    }

    let declared: HashSet<&str> = fields
        .iter()
        .map(|f| f.key.as_str())
        .chain(tag)
        .collect();

    for (key, value) in obj {
        if declared.contains(key.as_str()) {
            continue;
        }
        if closed {
            errors.push(ValidationDetails::undeclared_field(make_path(path, key)));
            valid = false;
        } else if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }

    Ok(valid.then_some(Value::Object(out)))
}

/// Runs a default through the field's schema. Defaults that fail are fatal.
fn resolve_default(field: &FieldSpec, default: &Value, field_path: &str) -> SchemaResult<Value> {
    let mut scratch = Vec::new();
    match process(&field.schema, default, field_path, &mut scratch)? {
        Some(value) if scratch.is_empty() => Ok(value),
        _ => Err(SchemaError::default_failed(field_path, join_details(&scratch))),
    }
}

/// Checks `value` against `schema` without logging; `Err` carries the reasons.
pub(crate) fn conforms(schema: &ValueSchema, value: &Value) -> Result<(), String> {
    let mut scratch = Vec::new();
    match process(schema, value, "", &mut scratch) {
        Ok(Some(_)) if scratch.is_empty() => Ok(()),
        Ok(_) => Err(join_details(&scratch)),
        Err(err) => Err(err.message().to_string()),
    }
}

fn join_details(details: &[ValidationDetails]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn expect_type(
    matches: bool,
    schema: &ValueSchema,
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationDetails>,
) -> Option<Value> {
    if matches {
        Some(value.clone())
    } else {
        errors.push(type_error(path, schema, value));
        None
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "$root"
    } else {
        path
    }
}

/// Creates a type mismatch detail.
fn type_error(path: &str, expected: &ValueSchema, actual: &Value) -> ValidationDetails {
    ValidationDetails::type_mismatch(
        display_path(path),
        expected.type_name(),
        json_type_name(actual),
    )
}
