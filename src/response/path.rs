//! Dot-path lookups over JSON trees

use serde_json::Value;

/// Resolve a dot-separated path against a JSON tree.
///
/// Object segments are looked up by key; numeric segments index into arrays.
/// Returns `None` as soon as a segment is missing or the current node has the
/// wrong shape. An empty path resolves to the root.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Resolve a path and clone the result, falling back to `default`.
pub fn get_path_or(value: &Value, path: &str, default: Value) -> Value {
    get_path(value, path).cloned().unwrap_or(default)
}
