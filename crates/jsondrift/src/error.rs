//! Errors raised by the reconciliation drivers.

use jsondrift_ignore::ValidationError;
use thiserror::Error;

use crate::patch::PatchKind;

/// Error type returned by a [`crate::PatchTransport`].
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid ignore pattern: {0}")]
    InvalidPattern(#[from] ValidationError),
    #[error("invalid options: {0}")]
    Config(String),
    /// Sending one operation failed. `applied` operations before it went
    /// through, so the resource may be partially patched.
    #[error("failed to {kind} attribute '{path}': {source}")]
    Transport {
        kind: PatchKind,
        path: String,
        applied: usize,
        #[source]
        source: TransportError,
    },
}

impl ReconcileError {
    /// Operations that reached the server before the failure, for
    /// [`ReconcileError::Transport`].
    pub fn applied(&self) -> Option<usize> {
        match self {
            ReconcileError::Transport { applied, .. } => Some(*applied),
            _ => None,
        }
    }
}
