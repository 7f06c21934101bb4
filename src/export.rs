// License: MIT

use serde_json::json;

use crate::config::Config;
use crate::value::{Object, Value};

/// Render a resolved configuration as a JSON string.
///
/// Objects, arrays, strings, numbers, booleans and null map directly.
/// Durations export as their nanosecond count. Unresolved leftovers
/// (optional substitutions that never matched) export as their `${...}`
/// string form.
pub fn to_json_string(config: &Config) -> String {
    value_to_json(config.root()).to_string()
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Object(object) => object_to_json(object),
        Value::Array(values) => json!(values.iter().map(value_to_json).collect::<Vec<_>>()),
        Value::String(s) => json!(s),
        Value::Int(value) => json!(value),
        Value::Float(value) => json!(value),
        Value::Boolean(value) => json!(value),
        Value::Null => serde_json::Value::Null,
        Value::Duration(duration) => json!(duration.as_nanos() as u64),
        other => json!(other.to_string()),
    }
}

fn object_to_json(object: &Object) -> serde_json::Value {
    let mut map = serde_json::Map::new();

    for (key, value) in object {
        map.insert(key.clone(), value_to_json(value));
    }

    serde_json::Value::Object(map)
}
