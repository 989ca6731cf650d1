//! JSON codecs for patch operations.
//!
//! Two wire forms are supported:
//!
//! - the JSON-Patch-like form, `{"op": "add", "path": "name", "value": ...}`;
//! - the object-modification form,
//!   `{"objectModification": {"itemDelta": {"modificationType": "add", "path": "name", "value": ...}}}`.
//!
//! `delete` carries no value in either form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{PatchError, PatchKind, PatchOp};

const OBJECT_MODIFICATION: &str = "objectModification";
const ITEM_DELTA: &str = "itemDelta";
const MODIFICATION_TYPE: &str = "modificationType";

// ── Helpers ───────────────────────────────────────────────────────────────

fn encode_fields(kind_key: &str, op: &PatchOp) -> Value {
    let mut m = Map::new();
    m.insert(kind_key.into(), Value::String(op.kind().as_str().into()));
    m.insert("path".into(), Value::String(op.path().into()));
    if let Some(value) = op.value() {
        m.insert("value".into(), value.clone());
    }
    Value::Object(m)
}

fn decode_fields(kind_key: &str, v: &Value) -> Result<PatchOp, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let kind = obj
        .get(kind_key)
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp(format!("missing '{kind_key}' field")))?;
    let kind = PatchKind::from_str(kind)?;
    let path = obj
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("path must be a string".into()))?;
    PatchOp::new(kind, path, obj.get("value").cloned())
}

// ── JSON-Patch-like form ──────────────────────────────────────────────────

/// Serialize an operation in the JSON-Patch-like form.
pub fn to_json(op: &PatchOp) -> Value {
    encode_fields("op", op)
}

/// Deserialize an operation from the JSON-Patch-like form.
pub fn from_json(v: &Value) -> Result<PatchOp, PatchError> {
    decode_fields("op", v)
}

/// Serialize a list of operations into a JSON array.
pub fn to_json_patch(ops: &[PatchOp]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

/// Deserialize a JSON array into a list of operations.
pub fn from_json_patch(v: &Value) -> Result<Vec<PatchOp>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}

// ── Object-modification form ──────────────────────────────────────────────

/// Serialize an operation as an object-modification request body.
pub fn to_item_delta(op: &PatchOp) -> Value {
    let mut inner = Map::new();
    inner.insert(ITEM_DELTA.into(), encode_fields(MODIFICATION_TYPE, op));
    let mut outer = Map::new();
    outer.insert(OBJECT_MODIFICATION.into(), Value::Object(inner));
    Value::Object(outer)
}

/// Deserialize an object-modification request body.
pub fn from_item_delta(v: &Value) -> Result<PatchOp, PatchError> {
    let delta = v
        .get(OBJECT_MODIFICATION)
        .and_then(|m| m.get(ITEM_DELTA))
        .ok_or_else(|| PatchError::InvalidOp("missing 'objectModification.itemDelta'".into()))?;
    decode_fields(MODIFICATION_TYPE, delta)
}

// ── Format selector ───────────────────────────────────────────────────────

/// Which wire form a transport receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchFormat {
    #[default]
    ObjectModification,
    JsonPatch,
}

impl PatchFormat {
    pub fn encode(&self, op: &PatchOp) -> Value {
        match self {
            PatchFormat::ObjectModification => to_item_delta(op),
            PatchFormat::JsonPatch => to_json(op),
        }
    }

    pub fn decode(&self, v: &Value) -> Result<PatchOp, PatchError> {
        match self {
            PatchFormat::ObjectModification => from_item_delta(v),
            PatchFormat::JsonPatch => from_json(v),
        }
    }
}
