//! Type definitions for ignore patterns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix that marks a pattern as a wildcard (`*.field`).
pub const WILDCARD_PREFIX: &str = "*.";

/// Separator between the components of a dotted path.
pub const SEPARATOR: char = '.';

/// Marker some servers put in front of the keys they manage (`@metadata`,
/// `@ns`). A wildcard for `field` also matches `@field`.
pub const ANNOTATION_PREFIX: char = '@';

/// A single ignore pattern.
///
/// The three shapes carry different scoping rules as recursion descends
/// through an object tree:
///
/// - [`IgnorePattern::Wildcard`] matches its field at every depth and is
///   never consumed.
/// - [`IgnorePattern::Simple`] matches only at the level it was supplied for.
/// - [`IgnorePattern::Dotted`] matches only once recursion has walked the
///   exact key sequence in front of its last component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IgnorePattern {
    /// `*.<field>`
    Wildcard(String),
    /// `<field>`
    Simple(String),
    /// `<k1>.<k2>...<kn>`, always at least two components.
    Dotted(Vec<String>),
}

impl IgnorePattern {
    /// Parse a pattern from its string form. Every string is a pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use jsondrift_ignore::IgnorePattern;
    ///
    /// assert_eq!(IgnorePattern::parse("*.metadata"), IgnorePattern::Wildcard("metadata".into()));
    /// assert_eq!(IgnorePattern::parse("name"), IgnorePattern::Simple("name".into()));
    /// assert_eq!(
    ///     IgnorePattern::parse("hobbies.sleeping"),
    ///     IgnorePattern::Dotted(vec!["hobbies".into(), "sleeping".into()]),
    /// );
    /// ```
    pub fn parse(pattern: &str) -> Self {
        if let Some(field) = pattern.strip_prefix(WILDCARD_PREFIX) {
            return IgnorePattern::Wildcard(field.to_string());
        }
        if pattern.contains(SEPARATOR) {
            return IgnorePattern::Dotted(pattern.split(SEPARATOR).map(str::to_string).collect());
        }
        IgnorePattern::Simple(pattern.to_string())
    }

    /// Returns true if this pattern suppresses `field` at the current level.
    ///
    /// Simple keys match verbatim. Wildcards match their field verbatim or
    /// in its annotated `@field` form. Dotted paths never match directly;
    /// they only reach a level after [`IgnorePattern::descend`] has reduced
    /// them.
    pub fn matches(&self, field: &str) -> bool {
        match self {
            IgnorePattern::Simple(f) => f == field,
            IgnorePattern::Wildcard(f) => {
                f == field || field.strip_prefix(ANNOTATION_PREFIX) == Some(f.as_str())
            }
            IgnorePattern::Dotted(_) => false,
        }
    }

    /// The pattern that applies one level inside `key`, if any.
    ///
    /// The remainder of a dotted path is re-parsed, so `outer.*.id` becomes
    /// the wildcard `*.id` once recursion enters `outer`.
    pub fn descend(&self, key: &str) -> Option<IgnorePattern> {
        match self {
            IgnorePattern::Wildcard(_) => Some(self.clone()),
            IgnorePattern::Simple(_) => None,
            IgnorePattern::Dotted(components) => match components.split_first() {
                Some((head, rest)) if head == key && !rest.is_empty() => {
                    Some(IgnorePattern::parse(&rest.join(".")))
                }
                _ => None,
            },
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, IgnorePattern::Wildcard(_))
    }
}

impl fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnorePattern::Wildcard(field) => write!(f, "{WILDCARD_PREFIX}{field}"),
            IgnorePattern::Simple(field) => f.write_str(field),
            IgnorePattern::Dotted(components) => f.write_str(&components.join(".")),
        }
    }
}

impl From<&str> for IgnorePattern {
    fn from(s: &str) -> Self {
        IgnorePattern::parse(s)
    }
}

impl From<String> for IgnorePattern {
    fn from(s: String) -> Self {
        IgnorePattern::parse(&s)
    }
}

// ── IgnoreList ────────────────────────────────────────────────────────────

/// The ignore patterns in effect at one level of a tree.
///
/// Serializes as a plain list of pattern strings, the form callers write in
/// configuration (`ignore_changes_to = ["*.metadata", "name"]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IgnoreList(Vec<IgnorePattern>);

impl IgnoreList {
    pub fn new() -> Self {
        IgnoreList(Vec::new())
    }

    /// Build a list from pattern strings.
    ///
    /// # Example
    ///
    /// ```
    /// use jsondrift_ignore::IgnoreList;
    ///
    /// let list = IgnoreList::from_strs(["*.metadata", "name"]);
    /// assert!(list.matches("metadata"));
    /// assert!(list.matches("name"));
    /// assert!(!list.descend("outer").matches("name"));
    /// ```
    pub fn from_strs<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        IgnoreList(patterns.into_iter().map(|p| IgnorePattern::parse(p.as_ref())).collect())
    }

    pub fn matches(&self, field: &str) -> bool {
        crate::matches(field, &self.0)
    }

    pub fn descend(&self, key: &str) -> IgnoreList {
        IgnoreList(crate::descend(key, &self.0))
    }

    pub fn push(&mut self, pattern: impl Into<IgnorePattern>) {
        self.0.push(pattern.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IgnorePattern> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[IgnorePattern] {
        &self.0
    }

    /// Check every pattern with [`crate::validate_ignore_pattern`].
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        for pattern in &self.0 {
            crate::validate_ignore_pattern(&pattern.to_string())?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for IgnoreList {
    fn from(patterns: Vec<String>) -> Self {
        IgnoreList(patterns.into_iter().map(IgnorePattern::from).collect())
    }
}

impl From<IgnoreList> for Vec<String> {
    fn from(list: IgnoreList) -> Self {
        list.0.iter().map(ToString::to_string).collect()
    }
}

impl From<Vec<IgnorePattern>> for IgnoreList {
    fn from(patterns: Vec<IgnorePattern>) -> Self {
        IgnoreList(patterns)
    }
}

impl FromIterator<IgnorePattern> for IgnoreList {
    fn from_iter<T: IntoIterator<Item = IgnorePattern>>(iter: T) -> Self {
        IgnoreList(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IgnoreList {
    type Item = &'a IgnorePattern;
    type IntoIter = std::slice::Iter<'a, IgnorePattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsRef<[IgnorePattern]> for IgnoreList {
    fn as_ref(&self) -> &[IgnorePattern] {
        &self.0
    }
}
