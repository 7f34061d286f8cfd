//! Turn server JSON into object instances.

use chrono::{DateTime, Utc};
use parse_types::constants::fields;
use parse_types::{decode_date, ParseValue};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{ObjectError, ObjectResult};
use crate::registry::ObjectRegistry;
use crate::traits::RemoteObject;

/// Instantiate and populate an object from server JSON.
///
/// A `className` in the JSON takes precedence over `class_name`, which is
/// what the caller queried. The result is marked clean: it mirrors the
/// server state.
pub fn decode_object(
    registry: &ObjectRegistry,
    class_name: &str,
    json: &Value,
) -> ObjectResult<Box<dyn RemoteObject>> {
    let obj = json
        .as_object()
        .ok_or_else(|| ObjectError::NotAnObject(json_kind(json)))?;
    let class_name = obj
        .get(fields::CLASS_NAME)
        .and_then(Value::as_str)
        .unwrap_or(class_name);

    let mut instance = registry.create(class_name);
    apply_json(instance.as_mut(), obj)?;
    trace!(
        class_name = instance.class_name(),
        fields = instance.object().len(),
        "decoded object"
    );
    Ok(instance)
}

/// Merge server JSON into an existing instance.
///
/// Metadata fields update the object's metadata; fields the specialization
/// absorbs are offered to it first; everything else is decoded as a
/// [`ParseValue`].
pub fn apply_json(target: &mut dyn RemoteObject, json: &Map<String, Value>) -> ObjectResult<()> {
    for (key, value) in json {
        match key.as_str() {
            fields::OBJECT_ID => {
                let id = value.as_str().ok_or_else(|| ObjectError::MalformedField {
                    key: key.clone(),
                    reason: "expected a string".into(),
                })?;
                target.object_mut().set_object_id(id);
            }
            fields::CREATED_AT => {
                let at = metadata_date(key, value)?;
                target.object_mut().set_created_at(at);
            }
            fields::UPDATED_AT => {
                let at = metadata_date(key, value)?;
                target.object_mut().set_updated_at(at);
            }
            fields::CLASS_NAME | fields::TYPE => {}
            _ => {
                if !target.absorb_field(key, value) {
                    let decoded = ParseValue::from_json(value)?;
                    target.object_mut().insert(key.as_str(), decoded);
                }
            }
        }
    }
    target.object_mut().set_dirty(false);
    Ok(())
}

/// `createdAt`/`updatedAt` arrive as bare wire strings on objects and as
/// typed dates elsewhere; accept both.
fn metadata_date(key: &str, value: &Value) -> ObjectResult<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => decode_date(s),
        Value::Object(_) => ParseValue::from_json(value)?.as_date().copied(),
        _ => None,
    };
    parsed.ok_or_else(|| ObjectError::MalformedField {
        key: key.to_owned(),
        reason: format!("not a date: {value}"),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
