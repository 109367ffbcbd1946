//! Conversion between wire JSON and `Resource`.
//!
//! This is the single place that knows the remote shape: top-level scalar
//! fields, the nested metadata map (`{key: [{"value": v}, ...]}`), and the
//! `_embedded` collection envelope. Every lookup failure is an explicit
//! `MalformedResponse`, never a silent null.

use serde_json::{json, Map, Value};

use crate::error::{ConnectorError, Result};
use crate::resource::types::{Page, Resource, ResourceKind};

/// Top-level keys that are not caller-visible attributes.
const RESERVED_KEYS: [&str; 7] = [
    "uuid", "id", "type", "name", "metadata", "_links", "_embedded",
];

/// Decode a single wire object.
pub fn decode_one(value: &Value) -> Result<Resource> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("expected a JSON object"))?;

    let id = object
        .get("uuid")
        .or_else(|| object.get("id"))
        .and_then(scalar_to_string)
        .ok_or_else(|| malformed("resource has no uuid or id"))?;

    let mut resource = Resource::new(id);
    if let Some(name) = object.get("name").and_then(Value::as_str) {
        resource.display_name = name.to_owned();
    }

    // plain top-level fields (email, netid, ...) become single-valued attributes
    for (key, field) in object {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        if let Some(value) = scalar_to_string(field) {
            resource.push_attribute(key, value);
        }
    }

    if let Some(metadata) = object.get("metadata") {
        flatten_metadata(metadata, &mut resource)?;
    }
    Ok(resource)
}

/// Decode a paginated `_embedded` envelope. An empty embedded array is a
/// valid empty page; a missing envelope or missing key is not.
pub fn decode_collection(value: &Value, kind: ResourceKind) -> Result<Page> {
    let embedded = value
        .get("_embedded")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("response has no _embedded envelope"))?;
    let items = embedded
        .get(kind.plural())
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(&format!("_embedded has no '{}' array", kind.plural())))?;

    let mut page = Page::default();
    for item in items {
        page.items.push(decode_one(item)?);
    }
    page.has_more = value
        .get("page")
        .map(|p| {
            let number = p.get("number").and_then(Value::as_u64).unwrap_or(0);
            let total = p.get("totalPages").and_then(Value::as_u64).unwrap_or(0);
            number + 1 < total
        })
        .unwrap_or(false);
    Ok(page)
}

/// Encode the writable attributes of a resource into the wire shape. Each
/// attribute becomes an ordered `[{"value": v}]` array under `metadata`;
/// attribute names pass through unchecked (schema enforcement is the
/// caller's concern).
pub fn encode(resource: &Resource) -> Value {
    let mut metadata = Map::new();
    for (key, values) in &resource.attributes {
        let wrapped: Vec<Value> = values.iter().map(|v| json!({ "value": v })).collect();
        metadata.insert(key.clone(), Value::Array(wrapped));
    }
    let mut body = Map::new();
    if !resource.display_name.is_empty() {
        body.insert(
            "name".to_owned(),
            Value::String(resource.display_name.clone()),
        );
    }
    body.insert("metadata".to_owned(), Value::Object(metadata));
    Value::Object(body)
}

/// Flatten `{key: [{"value": v}, ...]}` into ordered attribute values.
fn flatten_metadata(metadata: &Value, resource: &mut Resource) -> Result<()> {
    let map = metadata
        .as_object()
        .ok_or_else(|| malformed("metadata is not an object"))?;
    for (key, entries) in map {
        let entries = entries
            .as_array()
            .ok_or_else(|| malformed(&format!("metadata field '{}' is not an array", key)))?;
        let mut values = Vec::with_capacity(entries.len());
        for entry in entries {
            let value = entry
                .get("value")
                .and_then(scalar_to_string)
                .ok_or_else(|| {
                    malformed(&format!("metadata field '{}' has an entry without a value", key))
                })?;
            values.push(value);
        }
        resource.set_attribute(key, values);
    }
    Ok(())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn malformed(message: &str) -> ConnectorError {
    ConnectorError::MalformedResponse {
        message: message.to_owned(),
    }
}
