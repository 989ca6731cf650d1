//! Apply patch operations to an in-memory object.
//!
//! This is the server side of the incremental write protocol, used to check
//! that a synthesized patch really reconciles the two trees.

use serde_json::{Map, Value};

use super::types::{PatchError, PatchOp};

/// Apply one operation to `target` in place.
///
/// `add` fails if the field already exists, `replace` and `delete` fail if
/// it does not. Returns the previous value of the field, if any.
pub fn apply_op(target: &mut Map<String, Value>, op: &PatchOp) -> Result<Option<Value>, PatchError> {
    match op {
        PatchOp::Add { path, value } => {
            if target.contains_key(path) {
                return Err(PatchError::AlreadyExists(path.clone()));
            }
            target.insert(path.clone(), value.clone());
            Ok(None)
        }
        PatchOp::Replace { path, value } => {
            let slot = target
                .get_mut(path)
                .ok_or_else(|| PatchError::NotFound(path.clone()))?;
            Ok(Some(std::mem::replace(slot, value.clone())))
        }
        PatchOp::Delete { path } => target
            .remove(path)
            .map(Some)
            .ok_or_else(|| PatchError::NotFound(path.clone())),
    }
}

/// Apply a sequence of operations to a copy of `target`, stopping at the
/// first failure.
///
/// # Example
///
/// ```
/// use jsondrift::{apply_ops, PatchOp};
/// use serde_json::json;
///
/// let target = json!({"a": 1, "b": 2});
/// let ops = vec![
///     PatchOp::Replace { path: "a".into(), value: json!(10) },
///     PatchOp::Delete { path: "b".into() },
/// ];
/// let out = apply_ops(target.as_object().unwrap(), &ops).unwrap();
/// assert_eq!(serde_json::Value::Object(out), json!({"a": 10}));
/// ```
pub fn apply_ops(target: &Map<String, Value>, ops: &[PatchOp]) -> Result<Map<String, Value>, PatchError> {
    let mut doc = target.clone();
    for op in ops {
        apply_op(&mut doc, op)?;
    }
    Ok(doc)
}

/// [`apply_ops`] on an arbitrary document, which must be an object.
pub fn apply_patch(doc: &Value, ops: &[PatchOp]) -> Result<Value, PatchError> {
    let target = doc.as_object().ok_or(PatchError::InvalidTarget)?;
    apply_ops(target, ops).map(Value::Object)
}
