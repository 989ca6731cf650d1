//! Structural JSON equality.
//!
//! `serde_json::Value`'s `PartialEq` compares numbers by representation, so
//! `1` and `1.0` differ. Servers routinely echo integers back as floats (and
//! the other way round), so reconciliation compares numbers by value.

use serde_json::{Map, Number, Value};

/// Deep equality: numbers by value, objects key-by-key regardless of order,
/// arrays position by position.
///
/// # Example
///
/// ```
/// use jsondrift::json_equal;
/// use serde_json::json;
///
/// assert!(json_equal(&json!({"a": 1, "b": [2.0]}), &json!({"b": [2], "a": 1.0})));
/// assert!(!json_equal(&json!([1, 2]), &json!([2, 1])));
/// ```
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| json_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => object_equal(x, y),
        _ => false,
    }
}

/// [`json_equal`] for two objects.
pub fn object_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, x)| b.get(key).is_some_and(|y| json_equal(x, y)))
}

fn number_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
