//! Diff suppression for serialized documents.
//!
//! Declarative tools store desired state as JSON text. Two texts that differ
//! only in formatting, key order, or ignored fields describe the same
//! resource, and the diff between them should not be shown.

use jsondrift_ignore::IgnorePattern;
use serde_json::{Map, Value};

use crate::equal::object_equal;
use crate::filter::project;

/// Returns true when `old` and `new` describe the same object once both are
/// projected through `patterns`.
///
/// Returns false, so the caller shows the diff, when `old` is empty or `{}`
/// (the resource is new) or when either side is not a JSON object.
///
/// # Example
///
/// ```
/// use jsondrift::suppress_diff;
/// use jsondrift_ignore::IgnorePattern;
///
/// let patterns = [IgnorePattern::parse("etag")];
/// assert!(suppress_diff(r#"{"a":1,"etag":"x"}"#, r#"{ "a": 1 }"#, &patterns));
/// assert!(!suppress_diff(r#"{"a":1}"#, r#"{"a":2}"#, &patterns));
/// assert!(!suppress_diff("", r#"{"a":1}"#, &patterns));
/// ```
pub fn suppress_diff(old: &str, new: &str, patterns: &[IgnorePattern]) -> bool {
    if old.is_empty() || old == "{}" {
        return false;
    }
    let old_data: Map<String, Value> = match serde_json::from_str(old) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse old state, not suppressing diff");
            return false;
        }
    };
    let new_data: Map<String, Value> = match serde_json::from_str(new) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse new config, not suppressing diff");
            return false;
        }
    };

    let suppress = object_equal(&project(&old_data, patterns), &project(&new_data, patterns));
    tracing::debug!(suppress, patterns = patterns.len(), "diff suppression");
    suppress
}
