//! Field projection: strip ignored fields out of a tree.
//!
//! The projected tree is what gets sent to a server or persisted as state, so
//! server-managed fields named by the ignore list never leak into either.

use jsondrift_ignore::{descend, matches, IgnorePattern};
use serde_json::{Map, Value};

use crate::observer::{DeltaObserver, NoopObserver};

/// Return a copy of `tree` without the fields `patterns` ignore.
///
/// Keys matched at the current level are omitted. Object values are
/// projected with the patterns descended by their key, and so are the Object
/// elements of arrays. Everything else is copied verbatim.
///
/// # Example
///
/// ```
/// use jsondrift::project;
/// use jsondrift_ignore::IgnorePattern;
/// use serde_json::json;
///
/// let tree = json!({"name": "x", "metadata": 1, "inner": {"metadata": 2, "name": "y"}});
/// let patterns = vec![IgnorePattern::parse("*.metadata"), IgnorePattern::parse("name")];
/// let out = project(tree.as_object().unwrap(), &patterns);
/// assert_eq!(serde_json::Value::Object(out), json!({"inner": {"name": "y"}}));
/// ```
pub fn project(tree: &Map<String, Value>, patterns: &[IgnorePattern]) -> Map<String, Value> {
    project_observed(tree, patterns, &mut NoopObserver)
}

/// [`project`], reporting each omitted field to `observer`.
pub fn project_observed(
    tree: &Map<String, Value>,
    patterns: &[IgnorePattern],
    observer: &mut dyn DeltaObserver,
) -> Map<String, Value> {
    let mut path = Vec::new();
    project_map(tree, patterns, &mut path, observer)
}

/// [`project`] over any value: `null` stays `null`, objects are projected and
/// everything else is returned as is.
pub fn project_value(value: &Value, patterns: &[IgnorePattern]) -> Value {
    match value {
        Value::Object(map) => Value::Object(project(map, patterns)),
        other => other.clone(),
    }
}

/// Project the value stored under `key` in a tree whose level is governed by
/// `patterns`: the value sees the patterns descended by `key`, exactly as it
/// would inside a full [`project`] of the enclosing object.
pub fn project_field(key: &str, value: &Value, patterns: &[IgnorePattern]) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => {
            let inner = descend(key, patterns);
            let mut path = vec![key.to_string()];
            project_node(value, &inner, &mut path, &mut NoopObserver)
        }
        other => other.clone(),
    }
}

fn project_map(
    tree: &Map<String, Value>,
    patterns: &[IgnorePattern],
    path: &mut Vec<String>,
    observer: &mut dyn DeltaObserver,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in tree {
        if matches(key, patterns) {
            observer.on_ignored(path, key);
            continue;
        }
        let projected = match value {
            Value::Object(_) | Value::Array(_) => {
                let inner = descend(key, patterns);
                path.push(key.clone());
                let v = project_node(value, &inner, path, observer);
                path.pop();
                v
            }
            other => other.clone(),
        };
        out.insert(key.clone(), projected);
    }
    out
}

fn project_node(
    value: &Value,
    patterns: &[IgnorePattern],
    path: &mut Vec<String>,
    observer: &mut dyn DeltaObserver,
) -> Value {
    match value {
        Value::Object(map) => Value::Object(project_map(map, patterns, path, observer)),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(map) => {
                        path.push(i.to_string());
                        out.push(Value::Object(project_map(map, patterns, path, observer)));
                        path.pop();
                    }
                    other => out.push(other.clone()),
                }
            }
            Value::Array(out)
        }
        other => other.clone(),
    }
}
