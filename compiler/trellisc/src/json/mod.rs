//! Conversion between JSON documents and template values.
//!
//! Objects keep their key order (`serde_json` is built with
//! `preserve_order`). Integers that fit in `i64` stay integers; every other
//! number becomes a float. Non-finite floats have no JSON form and are
//! written as `null`, matching `serde_json`'s own serializer.

use serde_json::{Number, Value as Json};
use trellis_value::{Map, Value};

/// Convert a parsed JSON document into a template value.
pub fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => number(&n),
        Json::String(s) => Value::Str(s),
        Json::Array(items) => Value::List(items.into_iter().map(from_json).collect()),
        Json::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

fn number(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Convert a template value into a JSON document.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::Str(s) => Json::String(s.clone()),
        Value::List(items) => Json::Array(items.iter().map(to_json).collect()),
        Value::Map(map) => Json::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect(),
        ),
    }
}

/// Convert a JSON document that must be an object, e.g. a globals file.
///
/// Returns the type name of the document when it is not an object.
pub fn object_from_json(json: Json) -> Result<Map, &'static str> {
    match from_json(json) {
        Value::Map(map) => Ok(map),
        other => Err(other.type_name()),
    }
}

#[cfg(test)]
mod tests;
