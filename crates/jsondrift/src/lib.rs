//! Ignore-aware reconciliation of JSON trees.
//!
//! Given a desired (or recorded) tree and the tree a server returns, this
//! crate decides what differs, suppresses differences in fields the caller
//! declared uninteresting, and synthesizes add/replace/delete operations for
//! servers that only accept incremental modifications.
//!
//! # Components
//!
//! - [`project`]: strip ignored fields from a tree.
//! - [`delta()`]: merged tree plus a changed flag.
//! - [`merge_ignored`]: overlay ignored fields from the authoritative tree.
//! - [`synthesize`]: the patch operations that reconcile two objects.
//! - [`check_drift`] / [`plan_update`] / [`apply_plan`]: lifecycle drivers.
//!
//! Ignore patterns live in [`jsondrift_ignore`] and are re-exported here.
//!
//! # Recursion depth
//!
//! Every pass recurses once per level of nesting. Trees parsed by
//! `serde_json` are limited to 128 levels, and there is no separate limit
//! here.
//!
//! # Example
//!
//! ```
//! use jsondrift::{delta, IgnorePattern};
//! use serde_json::json;
//!
//! let recorded = json!({"metadata": "v1", "outer": {"metadata": "v1"}});
//! let actual = json!({"metadata": "v1", "outer": {"metadata": "v2"}});
//! let (r, a) = (recorded.as_object().unwrap(), actual.as_object().unwrap());
//!
//! assert!(delta(r, a, &[IgnorePattern::parse("metadata")]).changed);
//! assert!(!delta(r, a, &[IgnorePattern::parse("*.metadata")]).changed);
//! ```

pub mod equal;
pub use equal::{json_equal, object_equal};

pub mod observer;
pub use observer::{DeltaObserver, NoopObserver, RecordingObserver, TracingObserver, Verdict};

pub mod filter;
pub use filter::{project, project_field, project_observed, project_value};

pub mod delta;
pub use delta::{delta, delta_observed, has_delta, Delta};

pub mod merge;
pub use merge::{merge_ignored, merge_ignored_observed};

pub mod envelope;
pub use envelope::{EnvelopeStrategy, Unwrapped};

pub mod patch;
pub use patch::{
    apply_op, apply_ops, apply_patch, synthesize, synthesize_observed, PatchError, PatchFormat, PatchKind,
    PatchOp,
};

pub mod suppress;
pub use suppress::suppress_diff;

pub mod error;
pub use error::{ReconcileError, TransportError};

pub mod config;
pub use config::ReconcileOptions;

pub mod reconcile;
pub use reconcile::{apply_plan, check_drift, plan_update, update, ApplyReport, PatchTransport, ReadOutcome, UpdatePlan};

pub mod cli;

pub use jsondrift_ignore::{IgnoreList, IgnorePattern, ValidationError};
