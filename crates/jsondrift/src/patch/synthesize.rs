//! Patch synthesis: the add/replace/delete operations that move an
//! authoritative object to a desired one.

use jsondrift_ignore::{matches, IgnorePattern};
use serde_json::{Map, Value};

use super::types::PatchOp;
use crate::envelope::EnvelopeStrategy;
use crate::equal::json_equal;
use crate::filter::project_field;
use crate::merge::merge_ignored_observed;
use crate::observer::{DeltaObserver, NoopObserver};

/// Compute the operations that reconcile `authoritative` with `desired`,
/// unwrapping a shared single-key envelope first.
///
/// Ignored fields are overlaid from `authoritative` before comparing, so they
/// are never replaced or deleted. Adds and replaces come first, in the order
/// of `desired`, followed by deletes in the order of `authoritative`. The
/// `id_field` is never deleted. Values are projected through the ignore list
/// before they are emitted.
///
/// # Example
///
/// ```
/// use jsondrift::{synthesize, PatchOp};
/// use jsondrift_ignore::IgnorePattern;
/// use serde_json::json;
///
/// let desired = json!({"role": {"name": "x", "priority": 5}});
/// let auth = json!({"role": {"name": "x", "priority": 3, "@metadata": {"ts": 1}}});
/// let ops = synthesize(
///     desired.as_object().unwrap(),
///     auth.as_object().unwrap(),
///     &[IgnorePattern::parse("*.metadata")],
///     "oid",
/// );
/// assert_eq!(ops, vec![PatchOp::Replace { path: "priority".into(), value: json!(5) }]);
/// ```
pub fn synthesize(
    desired: &Map<String, Value>,
    authoritative: &Map<String, Value>,
    patterns: &[IgnorePattern],
    id_field: &str,
) -> Vec<PatchOp> {
    synthesize_observed(
        desired,
        authoritative,
        patterns,
        id_field,
        &EnvelopeStrategy::default(),
        &mut NoopObserver,
    )
}

/// [`synthesize`] with an explicit envelope strategy, reporting ignore
/// matches and emitted operations to `observer`.
pub fn synthesize_observed(
    desired: &Map<String, Value>,
    authoritative: &Map<String, Value>,
    patterns: &[IgnorePattern],
    id_field: &str,
    envelope: &EnvelopeStrategy,
    observer: &mut dyn DeltaObserver,
) -> Vec<PatchOp> {
    let working = envelope.unwrap_envelope(desired, authoritative);
    let authoritative = working.authoritative;
    let effective = merge_ignored_observed(working.desired, authoritative, patterns, observer);

    let mut ops = Vec::new();
    for (key, value) in &effective {
        let op = match authoritative.get(key) {
            None => PatchOp::Add {
                path: key.clone(),
                value: project_field(key, value, patterns),
            },
            Some(current) if !json_equal(current, value) => PatchOp::Replace {
                path: key.clone(),
                value: project_field(key, value, patterns),
            },
            Some(_) => continue,
        };
        observer.on_operation(&op);
        ops.push(op);
    }

    for key in authoritative.keys() {
        if effective.contains_key(key) || key == id_field {
            continue;
        }
        if matches(key, patterns) {
            observer.on_ignored(&[], key);
            continue;
        }
        let op = PatchOp::Delete { path: key.clone() };
        observer.on_operation(&op);
        ops.push(op);
    }

    ops
}
