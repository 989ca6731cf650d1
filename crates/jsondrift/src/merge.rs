//! Overlay ignored fields from an authoritative tree onto a desired tree.
//!
//! Without this step a field the caller never declared (say a server-managed
//! `@metadata`) looks like something the desired tree wants deleted.

use jsondrift_ignore::{descend, matches, IgnorePattern};
use serde_json::{Map, Value};

use crate::observer::{DeltaObserver, NoopObserver};

/// Copy `desired`, then take every ignored field from `authoritative`.
///
/// For each key of `authoritative`: when it is ignored at this level its
/// authoritative value replaces (or is added to) the copy; otherwise, when
/// both sides hold an Object under the key, the merge recurses with the
/// patterns descended by the key. All other keys of `desired` are kept.
///
/// # Example
///
/// ```
/// use jsondrift::merge_ignored;
/// use jsondrift_ignore::IgnorePattern;
/// use serde_json::json;
///
/// let desired = json!({"name": "x", "spec": {"size": 2}});
/// let auth = json!({"name": "y", "spec": {"size": 1, "@metadata": {"ts": 1}}});
/// let merged = merge_ignored(
///     desired.as_object().unwrap(),
///     auth.as_object().unwrap(),
///     &[IgnorePattern::parse("*.metadata")],
/// );
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"name": "x", "spec": {"size": 2, "@metadata": {"ts": 1}}})
/// );
/// ```
pub fn merge_ignored(
    desired: &Map<String, Value>,
    authoritative: &Map<String, Value>,
    patterns: &[IgnorePattern],
) -> Map<String, Value> {
    merge_ignored_observed(desired, authoritative, patterns, &mut NoopObserver)
}

/// [`merge_ignored`], reporting each field taken from `authoritative`.
pub fn merge_ignored_observed(
    desired: &Map<String, Value>,
    authoritative: &Map<String, Value>,
    patterns: &[IgnorePattern],
    observer: &mut dyn DeltaObserver,
) -> Map<String, Value> {
    let mut result = desired.clone();
    let mut path = Vec::new();
    merge_into(&mut result, authoritative, patterns, &mut path, observer);
    result
}

fn merge_into(
    target: &mut Map<String, Value>,
    authoritative: &Map<String, Value>,
    patterns: &[IgnorePattern],
    path: &mut Vec<String>,
    observer: &mut dyn DeltaObserver,
) {
    if patterns.is_empty() {
        return;
    }
    for (key, auth_value) in authoritative {
        if matches(key, patterns) {
            observer.on_ignored(path, key);
            target.insert(key.clone(), auth_value.clone());
            continue;
        }
        if let (Some(Value::Object(target_map)), Value::Object(auth_map)) =
            (target.get_mut(key), auth_value)
        {
            let inner = descend(key, patterns);
            path.push(key.clone());
            merge_into(target_map, auth_map, &inner, path, observer);
            path.pop();
        }
    }
}
