//! Reconciliation options.

use jsondrift_ignore::{IgnoreList, IgnorePattern};
use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopeStrategy;
use crate::error::ReconcileError;
use crate::patch::PatchFormat;

/// Default identity field, never deleted by a patch.
pub const DEFAULT_ID_ATTRIBUTE: &str = "id";

/// How a resource is compared with and written back to its server.
///
/// Deserializes from the same snake_case keys a resource declares:
///
/// ```
/// use jsondrift::ReconcileOptions;
///
/// let opts = ReconcileOptions::from_json_str(
///     r#"{"ignore_changes_to": ["*.metadata", "name"], "id_attribute": "oid"}"#,
/// ).unwrap();
/// assert_eq!(opts.id_attribute, "oid");
/// assert_eq!(opts.ignore_changes_to.len(), 2);
/// assert!(!opts.ignore_all_server_changes);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Fields whose server-side differences are never reported or patched.
    pub ignore_changes_to: IgnoreList,
    /// Skip drift detection and change gating altogether.
    pub ignore_all_server_changes: bool,
    /// Field holding the server's identifier.
    pub id_attribute: String,
    pub envelope: EnvelopeStrategy,
    pub patch_format: PatchFormat,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            ignore_changes_to: IgnoreList::new(),
            ignore_all_server_changes: false,
            id_attribute: DEFAULT_ID_ATTRIBUTE.to_string(),
            envelope: EnvelopeStrategy::default(),
            patch_format: PatchFormat::default(),
        }
    }
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate options from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, ReconcileError> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn with_ignore(mut self, pattern: impl Into<IgnorePattern>) -> Self {
        self.ignore_changes_to.push(pattern);
        self
    }

    pub fn with_ignore_list(mut self, list: IgnoreList) -> Self {
        self.ignore_changes_to = list;
        self
    }

    pub fn with_ignore_all_server_changes(mut self, ignore_all: bool) -> Self {
        self.ignore_all_server_changes = ignore_all;
        self
    }

    pub fn with_id_attribute(mut self, id: impl Into<String>) -> Self {
        self.id_attribute = id.into();
        self
    }

    pub fn with_envelope(mut self, envelope: EnvelopeStrategy) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_patch_format(mut self, format: PatchFormat) -> Self {
        self.patch_format = format;
        self
    }

    /// Check the ignore list and identity field.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        self.ignore_changes_to.validate()?;
        if self.id_attribute.is_empty() {
            return Err(ReconcileError::Config("id_attribute must not be empty".into()));
        }
        if let EnvelopeStrategy::Key(key) = &self.envelope {
            if key.is_empty() {
                return Err(ReconcileError::Config("envelope key must not be empty".into()));
            }
        }
        Ok(())
    }

    /// The patterns that gate comparisons: none when every server change is
    /// ignored anyway.
    pub fn effective_patterns(&self) -> &[IgnorePattern] {
        if self.ignore_all_server_changes {
            &[]
        } else {
            self.ignore_changes_to.as_slice()
        }
    }
}
