//! Observer hook for the reconciliation engine.
//!
//! The recursive passes (filter, delta, merge, synthesize) report their
//! decisions to a [`DeltaObserver`] instead of logging directly. Paths are the
//! keys walked from the root, with array positions as decimal strings.

use crate::patch::PatchOp;

/// The outcome for one key compared by the delta engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Recorded and actual agree.
    Unchanged,
    /// Recorded and actual differ (including a key the server dropped).
    Changed,
    /// The key exists only on the actual side.
    Added,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Unchanged => "unchanged",
            Verdict::Changed => "changed",
            Verdict::Added => "added",
        }
    }
}

/// Receives engine decisions. Every method defaults to a no-op.
pub trait DeltaObserver {
    /// `key` under `path` matched an ignore pattern.
    fn on_ignored(&mut self, _path: &[String], _key: &str) {}

    /// The delta engine's verdict for `key` under `path`.
    fn on_verdict(&mut self, _path: &[String], _key: &str, _verdict: Verdict) {}

    /// The synthesizer emitted `op`.
    fn on_operation(&mut self, _op: &PatchOp) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DeltaObserver for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DeltaObserver for TracingObserver {
    fn on_ignored(&mut self, path: &[String], key: &str) {
        tracing::trace!(path = %join_path(path), key, "ignored field");
    }

    fn on_verdict(&mut self, path: &[String], key: &str, verdict: Verdict) {
        match verdict {
            Verdict::Unchanged => {
                tracing::trace!(path = %join_path(path), key, verdict = verdict.as_str())
            }
            _ => tracing::debug!(path = %join_path(path), key, verdict = verdict.as_str()),
        }
    }

    fn on_operation(&mut self, op: &PatchOp) {
        tracing::debug!(kind = %op.kind(), path = op.path(), "patch operation");
    }
}

/// One recorded event, see [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Ignored { path: String, key: String },
    Verdict { path: String, key: String, verdict: Verdict },
    Operation(PatchOp),
}

/// Keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<Event>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully qualified keys (`outer.metadata`) that were ignored.
    pub fn ignored(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Ignored { path, key } => Some(qualify(path, key)),
                _ => None,
            })
            .collect()
    }

    /// Fully qualified keys with the given verdict.
    pub fn with_verdict(&self, wanted: Verdict) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Verdict { path, key, verdict } if *verdict == wanted => {
                    Some(qualify(path, key))
                }
                _ => None,
            })
            .collect()
    }
}

impl DeltaObserver for RecordingObserver {
    fn on_ignored(&mut self, path: &[String], key: &str) {
        self.events.push(Event::Ignored {
            path: join_path(path),
            key: key.to_string(),
        });
    }

    fn on_verdict(&mut self, path: &[String], key: &str, verdict: Verdict) {
        self.events.push(Event::Verdict {
            path: join_path(path),
            key: key.to_string(),
            verdict,
        });
    }

    fn on_operation(&mut self, op: &PatchOp) {
        self.events.push(Event::Operation(op.clone()));
    }
}

/// Render a path in the dotted form ignore patterns use.
pub fn join_path(path: &[String]) -> String {
    path.join(".")
}

fn qualify(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}
