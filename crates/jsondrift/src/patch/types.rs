//! Core types for patch operations.
//!
//! A patch operation names a single top-level field of the object being
//! reconciled. Servers with an incremental write protocol receive one
//! operation per request.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("ALREADY_EXISTS: {0}")]
    AlreadyExists(String),
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

// ── Kind ──────────────────────────────────────────────────────────────────

/// The modification type of a [`PatchOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchKind {
    Add,
    Replace,
    Delete,
}

impl PatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchKind::Add => "add",
            PatchKind::Replace => "replace",
            PatchKind::Delete => "delete",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, PatchError> {
        match s {
            "add" => Ok(PatchKind::Add),
            "replace" => Ok(PatchKind::Replace),
            "delete" => Ok(PatchKind::Delete),
            other => Err(PatchError::InvalidOp(format!("unknown modification type: {other}"))),
        }
    }
}

impl fmt::Display for PatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A single-field modification.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Set a field the target does not have yet.
    Add { path: String, value: Value },
    /// Overwrite a field the target already has.
    Replace { path: String, value: Value },
    /// Remove a field from the target.
    Delete { path: String },
}

impl PatchOp {
    pub fn kind(&self) -> PatchKind {
        match self {
            PatchOp::Add { .. } => PatchKind::Add,
            PatchOp::Replace { .. } => PatchKind::Replace,
            PatchOp::Delete { .. } => PatchKind::Delete,
        }
    }

    /// The field name the operation targets.
    pub fn path(&self) -> &str {
        match self {
            PatchOp::Add { path, .. } | PatchOp::Replace { path, .. } | PatchOp::Delete { path } => {
                path
            }
        }
    }

    /// The value carried by `add` and `replace`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOp::Add { value, .. } | PatchOp::Replace { value, .. } => Some(value),
            PatchOp::Delete { .. } => None,
        }
    }

    /// Build an operation from its parts. `add` and `replace` need a value,
    /// `delete` ignores it.
    pub fn new(kind: PatchKind, path: impl Into<String>, value: Option<Value>) -> Result<Self, PatchError> {
        let path = path.into();
        match (kind, value) {
            (PatchKind::Add, Some(value)) => Ok(PatchOp::Add { path, value }),
            (PatchKind::Replace, Some(value)) => Ok(PatchOp::Replace { path, value }),
            (PatchKind::Delete, _) => Ok(PatchOp::Delete { path }),
            (kind, None) => Err(PatchError::InvalidOp(format!("{kind} requires 'value'"))),
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.path())
    }
}
