//! Safe navigation over JSON values
//!
//! Each helper checks one step of a path (existence, then type) and returns
//! `None` on any mismatch, so extractors can chain them with `and_then`.

use crate::types::{JsonObject, JsonValue};

/// Look up `key` and require an object
pub fn get_object<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a JsonObject> {
    obj.get(key)?.as_object()
}

/// Look up `key` and require an array
pub fn get_array<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a Vec<JsonValue>> {
    obj.get(key)?.as_array()
}

/// Look up `key` and require a string
pub fn get_str<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a str> {
    obj.get(key)?.as_str()
}

/// Look up `key` and require a number (integers widen to `f64`)
pub fn get_f64(obj: &JsonObject, key: &str) -> Option<f64> {
    obj.get(key)?.as_f64()
}

/// Look up `key` and require a boolean
pub fn get_bool(obj: &JsonObject, key: &str) -> Option<bool> {
    obj.get(key)?.as_bool()
}

/// First element of the array under `key`, required to be an object
pub fn first_object<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a JsonObject> {
    get_array(obj, key)?.first()?.as_object()
}

