//! Dotted-path addressing over nested JSON records
//!
//! Every other piece of the crate reads and writes record values through these
//! two functions. Traversal is purely structural: segments are object keys,
//! numeric-looking segments are plain keys (arrays are never indexed), and a
//! miss anywhere along the way yields `None` instead of an error.

use serde_json::{Map, Value};

/// Split a dotted path into its segments
///
/// Empty segments are kept as empty keys, so `"a..b"` addresses the key `""`
/// inside `a`.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.')
}

/// Read the value found at `path` inside `record`
///
/// Returns `None` when any intermediate segment is missing, `null`, or not an
/// object. A present `null` leaf is returned as `Some(&Value::Null)`.
///
/// # Examples
///
/// ```
/// use fleetdesk::core::path::get_at_path;
/// use serde_json::json;
///
/// let record = json!({ "customer": { "name": "Ramesh" } });
/// assert_eq!(get_at_path(&record, "customer.name"), Some(&json!("Ramesh")));
/// assert_eq!(get_at_path(&record, "vehicle.number"), None);
/// ```
pub fn get_at_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path).try_fold(record, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        _ => None,
    })
}

/// Return a copy of `record` with `value` written at `path`
///
/// Intermediate objects are created as needed; an intermediate segment that
/// currently holds a non-object value (including a bare reference id) is
/// replaced by a fresh object. The input record is never mutated.
///
/// # Examples
///
/// ```
/// use fleetdesk::core::path::{get_at_path, set_at_path};
/// use serde_json::json;
///
/// let record = json!({ "otherCharges": {} });
/// let updated = set_at_path(&record, "otherCharges.toll.amount", json!(120));
///
/// assert_eq!(get_at_path(&updated, "otherCharges.toll.amount"), Some(&json!(120)));
/// assert_eq!(record, json!({ "otherCharges": {} }));
/// ```
pub fn set_at_path(record: &Value, path: &str, value: Value) -> Value {
    let keys: Vec<&str> = segments(path).collect();
    write_segments(Some(record), &keys, value)
}

/// Return a copy of `record` with the leaf at `path` removed
///
/// Missing intermediate segments leave the record unchanged.
pub fn remove_at_path(record: &Value, path: &str) -> Value {
    let keys: Vec<&str> = segments(path).collect();
    remove_segments(record, &keys)
}

fn write_segments(current: Option<&Value>, keys: &[&str], value: Value) -> Value {
    let Some((head, rest)) = keys.split_first() else {
        return value;
    };

    let mut map = match current {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    let child = write_segments(map.get(*head), rest, value);
    map.insert((*head).to_string(), child);
    Value::Object(map)
}

fn remove_segments(current: &Value, keys: &[&str]) -> Value {
    let (Value::Object(map), Some((head, rest))) = (current, keys.split_first()) else {
        return current.clone();
    };

    let mut map = map.clone();
    if rest.is_empty() {
        map.remove(*head);
    } else if let Some(child) = map.get(*head) {
        let child = remove_segments(child, rest);
        map.insert((*head).to_string(), child);
    }
    Value::Object(map)
}
