//! Helpers for reading loosely-typed upstream JSON.
//!
//! The catalogue API was written against a JavaScript client, so these
//! helpers follow JavaScript's notion of "present" values, number printing
//! and object key order.

use serde_json::{Map, Number, Value};

/// Returns `true` for values a JavaScript `if (value)` would accept.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Looks up `key` on an object value, treating falsy entries as absent.
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

/// Looks up `key` on an optional object and returns it when it is an array.
pub fn array_field<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a [Value]> {
    value?.get(key)?.as_array().map(Vec::as_slice)
}

/// Formats a number the way `String(n)` does in JavaScript.
///
/// Magnitudes from `1e21` up and below `1e-6` use exponent notation
/// (`1e+21`, `1.5e-7`); everything else is plain decimal.
pub fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }

    match number.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.abs() >= 1e21 || f.abs() < 1e-6 => exponent_text(f),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

fn exponent_text(f: f64) -> String {
    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// Text of a scalar value: strings verbatim, numbers and booleans printed.
///
/// Arrays, objects and `null` have no scalar text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text of any value, falling back to compact JSON for composites.
pub fn display_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}

/// Iterates an object in JavaScript property order.
///
/// Keys that look like array indices come first in ascending numeric order,
/// followed by every other key in insertion order.
pub fn natural_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let (mut indexed, named): (Vec<_>, Vec<_>) =
        map.iter().partition(|(key, _)| array_index(key).is_some());

    indexed.sort_by_key(|(key, _)| array_index(key));
    indexed.extend(named);
    indexed
}

/// A copy of `value` whose objects, at every depth, are in JavaScript
/// property order.
pub fn in_property_order(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            natural_entries(map)
                .into_iter()
                .map(|(key, v)| (key.clone(), in_property_order(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(in_property_order).collect()),
        other => other.clone(),
    }
}

fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}
