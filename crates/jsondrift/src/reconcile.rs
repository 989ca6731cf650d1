//! Reconciliation drivers: drift detection on read, change-gated patching
//! on update.
//!
//! These tie the engine to a resource lifecycle. The transport that talks to
//! the server is supplied by the caller through [`PatchTransport`].

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::ReconcileOptions;
use crate::delta::delta_observed;
use crate::error::{ReconcileError, TransportError};
use crate::filter::project;
use crate::observer::TracingObserver;
use crate::patch::{synthesize_observed, PatchFormat, PatchOp};

// ── Read ──────────────────────────────────────────────────────────────────

/// The result of comparing recorded state with what the server returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    /// True if the server's object differs outside the ignore list.
    pub drift: bool,
    /// The tree to record as the new state.
    pub state: Map<String, Value>,
}

/// Compare recorded `state` with the server's `api` object.
///
/// Both sides are compared under the ignore list, and the new state is the
/// server's object with ignored fields removed. With
/// `ignore_all_server_changes` drift is never reported and the recorded
/// state is kept as is.
pub fn check_drift(
    state: &Map<String, Value>,
    api: &Map<String, Value>,
    options: &ReconcileOptions,
) -> ReadOutcome {
    if options.ignore_all_server_changes {
        debug!("ignoring all server changes, keeping recorded state");
        return ReadOutcome {
            drift: false,
            state: state.clone(),
        };
    }

    let patterns = options.ignore_changes_to.as_slice();
    let recorded = project(state, patterns);
    let d = delta_observed(&recorded, api, patterns, &mut TracingObserver);
    if d.changed {
        info!("found differences in remote resource");
    }

    ReadOutcome {
        drift: d.changed,
        state: project(api, patterns),
    }
}

// ── Update ────────────────────────────────────────────────────────────────

/// What an update needs to send.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePlan {
    /// Nothing outside the ignore list differs.
    Skip,
    /// Send these operations, in order.
    Patch(Vec<PatchOp>),
}

impl UpdatePlan {
    pub fn is_skip(&self) -> bool {
        matches!(self, UpdatePlan::Skip)
    }

    pub fn ops(&self) -> &[PatchOp] {
        match self {
            UpdatePlan::Skip => &[],
            UpdatePlan::Patch(ops) => ops,
        }
    }
}

/// Decide how to move the server's `actual` object to `desired`.
///
/// With a non-empty ignore list the delta engine gates the update first: if
/// only ignored fields differ, nothing is sent. Otherwise the synthesizer
/// produces the operations; an empty result also means [`UpdatePlan::Skip`].
pub fn plan_update(
    desired: &Map<String, Value>,
    actual: &Map<String, Value>,
    options: &ReconcileOptions,
) -> UpdatePlan {
    let patterns = options.effective_patterns();

    if !patterns.is_empty() {
        let d = delta_observed(desired, actual, patterns, &mut TracingObserver);
        if !d.changed {
            debug!("only ignored fields differ, skipping update");
            return UpdatePlan::Skip;
        }
    }

    if let Some(key) = options.envelope.unwrap_envelope(desired, actual).envelope {
        debug!(envelope = key, "unwrapped envelope for patching");
    }
    let ops = synthesize_observed(
        desired,
        actual,
        patterns,
        &options.id_attribute,
        &options.envelope,
        &mut TracingObserver,
    );
    if ops.is_empty() {
        debug!("no operations needed, skipping update");
        UpdatePlan::Skip
    } else {
        UpdatePlan::Patch(ops)
    }
}

// ── Transport ─────────────────────────────────────────────────────────────

/// Sends one encoded patch operation to the server.
pub trait PatchTransport {
    /// Send `body`, the JSON text encoding `op`. A returned body is the
    /// server's updated object.
    fn send(&mut self, op: &PatchOp, body: &str) -> Result<Option<String>, TransportError>;
}

/// What [`apply_plan`] sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Operations the server accepted.
    pub applied: usize,
    /// The last updated object the server returned, if it returns any.
    pub latest: Option<Value>,
}

/// Send `ops` through `transport` in order.
///
/// Stops at the first failure with [`ReconcileError::Transport`], which
/// names the failing operation and how many went through before it. Nothing
/// is retried. An accepted operation whose response body is not JSON still
/// counts as applied; `latest` is cleared.
pub fn apply_plan<T: PatchTransport + ?Sized>(
    transport: &mut T,
    ops: &[PatchOp],
    format: PatchFormat,
) -> Result<ApplyReport, ReconcileError> {
    let mut report = ApplyReport::default();
    for op in ops {
        let body = serde_json::to_string(&format.encode(op))?;
        info!(kind = %op.kind(), path = op.path(), "sending patch operation");
        debug!(payload = %body);

        let response = match transport.send(op, &body) {
            Ok(response) => response,
            Err(source) => {
                warn!(
                    kind = %op.kind(),
                    path = op.path(),
                    applied = report.applied,
                    error = %source,
                    "patch operation failed"
                );
                return Err(ReconcileError::Transport {
                    kind: op.kind(),
                    path: op.path().to_string(),
                    applied: report.applied,
                    source,
                });
            }
        };
        report.applied += 1;

        if let Some(response) = response {
            report.latest = match serde_json::from_str(&response) {
                Ok(object) => Some(object),
                Err(e) => {
                    warn!(
                        kind = %op.kind(),
                        path = op.path(),
                        error = %e,
                        "server response is not JSON, dropping returned object"
                    );
                    None
                }
            };
        }
    }
    Ok(report)
}

/// Plan and apply an update in one step, after validating `options`.
pub fn update<T: PatchTransport + ?Sized>(
    transport: &mut T,
    desired: &Map<String, Value>,
    actual: &Map<String, Value>,
    options: &ReconcileOptions,
) -> Result<ApplyReport, ReconcileError> {
    options.validate()?;
    match plan_update(desired, actual, options) {
        UpdatePlan::Skip => Ok(ApplyReport::default()),
        UpdatePlan::Patch(ops) => apply_plan(transport, &ops, options.patch_format),
    }
}
