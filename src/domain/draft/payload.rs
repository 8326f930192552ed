//! Helpers over the free-form JSON payload of a draft.

use serde_json::{Map, Value};

use super::errors::DraftError;

/// Payload key holding the project a draft belongs to.
pub const PROJECT_FIELD: &str = "project";

/// Returns `data.project` when it is a string.
pub fn project_of(data: &Value) -> Option<&str> {
    data.get(PROJECT_FIELD).and_then(Value::as_str)
}

/// Returns a copy of `data` with every key named in `fields` set to `null`,
/// at any depth.
///
/// Keys are nulled rather than removed so readers can tell "present but
/// stripped" from "never set".
pub fn strip_fields(data: &Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return data.clone();
    }
    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = if fields.iter().any(|f| f == key) {
                        Value::Null
                    } else {
                        strip_fields(value, fields)
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| strip_fields(v, fields)).collect()),
        other => other.clone(),
    }
}

/// Appends `value` to the array at `data[field]`, creating the array when
/// the key is absent or null.
pub fn append_to_array(data: &mut Value, field: &str, value: Value) -> Result<usize, DraftError> {
    if data.is_null() {
        *data = Value::Object(Map::new());
    }
    let object = data
        .as_object_mut()
        .ok_or_else(|| DraftError::invalid_payload("payload is not a JSON object"))?;

    let slot = object
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    let items = slot
        .as_array_mut()
        .ok_or_else(|| DraftError::invalid_payload(format!("'{field}' is not an array")))?;
    items.push(value);
    Ok(items.len())
}

/// Sets `data[field]`, replacing any previous value.
pub fn set_field(data: &mut Value, field: &str, value: Value) -> Result<(), DraftError> {
    if data.is_null() {
        *data = Value::Object(Map::new());
    }
    data.as_object_mut()
        .ok_or_else(|| DraftError::invalid_payload("payload is not a JSON object"))?
        .insert(field.to_string(), value);
    Ok(())
}
