//! Patch operations for servers with an incremental write protocol.
//!
//! # Operations
//!
//! `add`, `replace` and `delete`, each naming one top-level field of the
//! object being reconciled.

pub mod types;
pub mod synthesize;
pub mod apply;
pub mod codec;

pub use types::{PatchError, PatchKind, PatchOp};
pub use synthesize::{synthesize, synthesize_observed};
pub use apply::{apply_op, apply_ops, apply_patch};
pub use codec::{from_item_delta, from_json, from_json_patch, to_item_delta, to_json, to_json_patch, PatchFormat};
