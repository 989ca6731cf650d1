//! Envelope unwrapping for servers that wrap objects in a type key.
//!
//! Some servers return `{"role": {...}}` for a role and expect modifications
//! addressed to the fields inside it. The strategy decides when the synthesizer
//! works on the inner objects instead of the documents themselves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// When to look through a single wrapping key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStrategy {
    /// Always work on the documents as given.
    None,
    /// Unwrap when both documents have exactly one top-level key, the same
    /// key, holding an Object on both sides.
    #[default]
    SingleMatchingKey,
    /// Unwrap only this key, under the same conditions as
    /// [`EnvelopeStrategy::SingleMatchingKey`].
    Key(String),
}

/// The pair of objects to reconcile after unwrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unwrapped<'a> {
    pub desired: &'a Map<String, Value>,
    pub authoritative: &'a Map<String, Value>,
    /// The key that was looked through, if any.
    pub envelope: Option<&'a str>,
}

impl EnvelopeStrategy {
    /// Select the working objects for `desired` and `authoritative`.
    ///
    /// # Example
    ///
    /// ```
    /// use jsondrift::EnvelopeStrategy;
    /// use serde_json::json;
    ///
    /// let desired = json!({"role": {"priority": 5}});
    /// let auth = json!({"role": {"priority": 3}});
    /// let u = EnvelopeStrategy::default()
    ///     .unwrap_envelope(desired.as_object().unwrap(), auth.as_object().unwrap());
    /// assert_eq!(u.envelope, Some("role"));
    /// assert_eq!(u.desired.get("priority"), Some(&json!(5)));
    /// ```
    pub fn unwrap_envelope<'a>(
        &self,
        desired: &'a Map<String, Value>,
        authoritative: &'a Map<String, Value>,
    ) -> Unwrapped<'a> {
        let as_given = Unwrapped {
            desired,
            authoritative,
            envelope: None,
        };
        let wanted = match self {
            EnvelopeStrategy::None => return as_given,
            EnvelopeStrategy::SingleMatchingKey => None,
            EnvelopeStrategy::Key(key) => Some(key.as_str()),
        };
        if desired.len() != 1 || authoritative.len() != 1 {
            return as_given;
        }
        let (Some((d_key, d_value)), Some((a_key, a_value))) =
            (desired.iter().next(), authoritative.iter().next())
        else {
            return as_given;
        };
        if d_key != a_key || wanted.is_some_and(|w| w != d_key) {
            return as_given;
        }
        match (d_value, a_value) {
            (Value::Object(d), Value::Object(a)) => Unwrapped {
                desired: d,
                authoritative: a,
                envelope: Some(d_key.as_str()),
            },
            _ => as_given,
        }
    }
}
