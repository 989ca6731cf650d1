//! Recursive delta between a recorded tree and the tree a server returns.
//!
//! The result is the tree the caller should persist (recorded values where
//! nothing meaningful changed, actual values elsewhere) and a single flag
//! saying whether anything outside the ignore list drifted.

use jsondrift_ignore::{descend, matches, IgnorePattern};
use serde_json::{Map, Value};

use crate::equal::json_equal;
use crate::observer::{DeltaObserver, NoopObserver, Verdict};

/// The outcome of [`delta`].
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    /// Recorded values for unchanged and ignored keys, actual values for the
    /// rest.
    pub merged: Map<String, Value>,
    /// True if any key outside the ignore list differs.
    pub changed: bool,
}

impl Delta {
    pub fn into_value(self) -> Value {
        Value::Object(self.merged)
    }
}

/// Compare `recorded` with `actual` under `patterns`.
///
/// Per key of `recorded`:
///
/// - ignored keys keep the recorded value and never count as a change;
/// - a recorded `null` is unchanged when `actual` lacks the key or holds
///   `null`;
/// - objects recurse with the patterns descended by the key;
/// - arrays of different length are replaced wholesale, arrays of equal
///   length are compared index by index (object elements recurse);
/// - everything else compares with [`json_equal`].
///
/// Keys only `actual` has are copied in as changes unless ignored, in which
/// case they are dropped. A key `actual` lacks is stored as `null` and counts
/// as a change.
///
/// # Example
///
/// ```
/// use jsondrift::delta;
/// use jsondrift_ignore::IgnorePattern;
/// use serde_json::json;
///
/// let recorded = json!({"name": "Joey", "color": "tabby"});
/// let actual = json!({"color": "tabby", "hairball": true});
/// let patterns = vec![IgnorePattern::parse("name"), IgnorePattern::parse("hairball")];
///
/// let d = delta(recorded.as_object().unwrap(), actual.as_object().unwrap(), &patterns);
/// assert!(!d.changed);
/// assert_eq!(d.into_value(), recorded);
/// ```
pub fn delta(
    recorded: &Map<String, Value>,
    actual: &Map<String, Value>,
    patterns: &[IgnorePattern],
) -> Delta {
    delta_observed(recorded, actual, patterns, &mut NoopObserver)
}

/// [`delta`], reporting ignore matches and per-key verdicts to `observer`.
pub fn delta_observed(
    recorded: &Map<String, Value>,
    actual: &Map<String, Value>,
    patterns: &[IgnorePattern],
    observer: &mut dyn DeltaObserver,
) -> Delta {
    let mut path = Vec::new();
    delta_map(recorded, actual, patterns, &mut path, observer)
}

/// Shorthand for `delta(..).changed`.
pub fn has_delta(
    recorded: &Map<String, Value>,
    actual: &Map<String, Value>,
    patterns: &[IgnorePattern],
) -> bool {
    delta(recorded, actual, patterns).changed
}

fn delta_map(
    recorded: &Map<String, Value>,
    actual: &Map<String, Value>,
    patterns: &[IgnorePattern],
    path: &mut Vec<String>,
    observer: &mut dyn DeltaObserver,
) -> Delta {
    let mut merged = Map::new();
    let mut changed = false;

    for (key, rec) in recorded {
        if matches(key, patterns) {
            observer.on_ignored(path, key);
            merged.insert(key.clone(), rec.clone());
            continue;
        }

        let act = actual.get(key);
        let (value, key_changed) = match (rec, act) {
            (Value::Null, None | Some(Value::Null)) => (Value::Null, false),
            (Value::Object(rec_map), Some(Value::Object(act_map))) => {
                let inner = descend(key, patterns);
                path.push(key.clone());
                let sub = delta_map(rec_map, act_map, &inner, path, observer);
                path.pop();
                (Value::Object(sub.merged), sub.changed)
            }
            (Value::Array(rec_items), Some(Value::Array(act_items))) => {
                let inner = descend(key, patterns);
                path.push(key.clone());
                let (items, items_changed) =
                    delta_array(rec_items, act_items, &inner, path, observer);
                path.pop();
                (Value::Array(items), items_changed)
            }
            (rec, Some(act)) => {
                if json_equal(rec, act) {
                    (rec.clone(), false)
                } else {
                    (act.clone(), true)
                }
            }
            (_, None) => (Value::Null, true),
        };

        let verdict = if key_changed {
            Verdict::Changed
        } else {
            Verdict::Unchanged
        };
        observer.on_verdict(path, key, verdict);
        merged.insert(key.clone(), value);
        changed |= key_changed;
    }

    for (key, act) in actual {
        if recorded.contains_key(key) {
            continue;
        }
        if matches(key, patterns) {
            observer.on_ignored(path, key);
            continue;
        }
        observer.on_verdict(path, key, Verdict::Added);
        merged.insert(key.clone(), act.clone());
        changed = true;
    }

    Delta { merged, changed }
}

fn delta_array(
    recorded: &[Value],
    actual: &[Value],
    patterns: &[IgnorePattern],
    path: &mut Vec<String>,
    observer: &mut dyn DeltaObserver,
) -> (Vec<Value>, bool) {
    if recorded.len() != actual.len() {
        return (actual.to_vec(), true);
    }

    let mut out = Vec::with_capacity(recorded.len());
    let mut changed = false;
    for (i, (rec, act)) in recorded.iter().zip(actual).enumerate() {
        match (rec, act) {
            (Value::Object(rec_map), Value::Object(act_map)) => {
                path.push(i.to_string());
                let sub = delta_map(rec_map, act_map, patterns, path, observer);
                path.pop();
                changed |= sub.changed;
                out.push(Value::Object(sub.merged));
            }
            _ if json_equal(rec, act) => out.push(rec.clone()),
            _ => {
                changed = true;
                out.push(act.clone());
            }
        }
    }
    (out, changed)
}
