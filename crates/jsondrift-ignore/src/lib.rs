//! Ignore patterns for JSON tree reconciliation.
//!
//! An ignore pattern names fields whose differences are uninteresting when a
//! desired JSON document is compared with the document a server returns.
//! Patterns come in three shapes, and each shape scopes differently as
//! recursion descends into nested objects:
//!
//! | pattern             | matches                                   | after descending into `k` |
//! |---------------------|-------------------------------------------|---------------------------|
//! | `*.metadata`        | `metadata` at every depth                 | unchanged                 |
//! | `metadata`          | `metadata` at the current level only      | dropped                   |
//! | `outer.metadata`    | nothing at the current level              | `metadata` if `k == outer`, else dropped |
//!
//! # Example
//!
//! ```
//! use jsondrift_ignore::{descend, matches, IgnorePattern};
//!
//! let patterns: Vec<IgnorePattern> = ["metadata", "*.version", "outer.id"]
//!     .into_iter()
//!     .map(IgnorePattern::parse)
//!     .collect();
//!
//! assert!(matches("metadata", &patterns));
//! assert!(matches("version", &patterns));
//! assert!(!matches("id", &patterns));
//!
//! let inner = descend("outer", &patterns);
//! assert!(!matches("metadata", &inner));
//! assert!(matches("version", &inner));
//! assert!(matches("id", &inner));
//! ```

pub mod types;
pub use types::{IgnoreList, IgnorePattern, ANNOTATION_PREFIX, SEPARATOR, WILDCARD_PREFIX};

pub mod validate;
pub use validate::{validate_ignore_list, validate_ignore_pattern, ValidationError};

/// Returns true if `field` is ignored at the current level.
///
/// A field is ignored when it equals a simple-key pattern or the field named
/// by a wildcard pattern (`*.metadata` also covers `@metadata`). Dotted paths
/// never match here.
pub fn matches(field: &str, patterns: &[IgnorePattern]) -> bool {
    patterns.iter().any(|p| p.matches(field))
}

/// Compute the patterns that apply one level inside `key`.
///
/// Wildcards are carried through, simple keys are dropped, and dotted paths
/// are shifted by one component when their head is `key` (dropped
/// otherwise). The result is never longer than the input.
///
/// # Example
///
/// ```
/// use jsondrift_ignore::{descend, IgnorePattern};
///
/// let patterns = vec![
///     IgnorePattern::parse("foo"),
///     IgnorePattern::parse("bar.alpha"),
///     IgnorePattern::parse("bar.bravo.charlie"),
///     IgnorePattern::parse("baz.delta"),
///     IgnorePattern::parse("*.echo"),
/// ];
/// let inner: Vec<String> = descend("bar", &patterns).iter().map(|p| p.to_string()).collect();
/// assert_eq!(inner, vec!["alpha", "bravo.charlie", "*.echo"]);
/// ```
pub fn descend(key: &str, patterns: &[IgnorePattern]) -> Vec<IgnorePattern> {
    patterns.iter().filter_map(|p| p.descend(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(patterns: &[&str]) -> Vec<IgnorePattern> {
        patterns.iter().map(|p| IgnorePattern::parse(p)).collect()
    }

    fn strings(patterns: &[IgnorePattern]) -> Vec<String> {
        patterns.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(IgnorePattern::parse("*.id"), IgnorePattern::Wildcard("id".into()));
        assert_eq!(IgnorePattern::parse("id"), IgnorePattern::Simple("id".into()));
        assert_eq!(
            IgnorePattern::parse("a.b.c"),
            IgnorePattern::Dotted(vec!["a".into(), "b".into(), "c".into()])
        );
        // Not a wildcard: the prefix is `*.`, not `*`
        assert_eq!(IgnorePattern::parse("*"), IgnorePattern::Simple("*".into()));
    }

    #[test]
    fn test_display_roundtrip() {
        for p in ["*.metadata", "name", "hobbies.sleeping", "outer.*.id", "a.b.c.d"] {
            assert_eq!(IgnorePattern::parse(p).to_string(), p);
        }
    }

    #[test]
    fn test_matches_exact() {
        let patterns = parse_all(&["foo"]);
        assert!(matches("foo", &patterns));
        assert!(!matches("bar", &patterns));
        assert!(!matches("fo", &patterns));
    }

    #[test]
    fn test_matches_wildcard() {
        let patterns = parse_all(&["*.metadata"]);
        assert!(matches("metadata", &patterns));
        assert!(!matches("*.metadata", &patterns));
        assert!(!matches("meta", &patterns));
    }

    #[test]
    fn test_matches_wildcard_annotated_form() {
        let patterns = parse_all(&["*.metadata"]);
        assert!(matches("@metadata", &patterns));
        assert!(!matches("@@metadata", &patterns));
        assert!(!matches("@meta", &patterns));

        // Simple keys stay verbatim
        let patterns = parse_all(&["metadata"]);
        assert!(!matches("@metadata", &patterns));
    }

    #[test]
    fn test_matches_dotted_never_direct() {
        let patterns = parse_all(&["outer.metadata"]);
        assert!(!matches("outer", &patterns));
        assert!(!matches("metadata", &patterns));
        assert!(!matches("outer.metadata", &patterns));
    }

    #[test]
    fn test_matches_empty_list() {
        assert!(!matches("anything", &[]));
    }

    #[test]
    fn test_descend_drops_simple_keys() {
        let patterns = parse_all(&["metadata", "name"]);
        assert!(descend("outer", &patterns).is_empty());
        assert!(descend("metadata", &patterns).is_empty());
    }

    #[test]
    fn test_descend_keeps_wildcards() {
        let patterns = parse_all(&["*.metadata"]);
        let once = descend("a", &patterns);
        let twice = descend("b", &once);
        assert_eq!(strings(&twice), vec!["*.metadata"]);
    }

    #[test]
    fn test_descend_shifts_dotted_paths() {
        let patterns = parse_all(&["foo", "bar.alpha", "bar.bravo"]);
        assert_eq!(strings(&descend("bar", &patterns)), vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_descend_drops_mismatched_dotted_paths() {
        let patterns = parse_all(&["bar.alpha", "baz.bravo.charlie"]);
        assert!(descend("qux", &patterns).is_empty());
    }

    #[test]
    fn test_descend_multi_level() {
        let patterns = parse_all(&["resource.connectorRef.oid"]);
        let level1 = descend("resource", &patterns);
        assert_eq!(strings(&level1), vec!["connectorRef.oid"]);
        assert!(!matches("oid", &level1));
        let level2 = descend("connectorRef", &level1);
        assert!(matches("oid", &level2));
        assert!(descend("oid", &level2).is_empty());
    }

    #[test]
    fn test_descend_scoped_wildcard() {
        let patterns = parse_all(&["outer.*.id"]);
        assert!(!matches("id", &patterns));
        let inner = descend("outer", &patterns);
        assert!(matches("id", &inner));
        let deeper = descend("x", &descend("y", &inner));
        assert!(matches("id", &deeper));
        assert!(descend("other", &patterns).is_empty());
    }

    #[test]
    fn test_descend_never_grows() {
        let patterns = parse_all(&["a", "*.b", "c.d", "e.f.g", "c.h"]);
        for key in ["a", "b", "c", "e", "zzz"] {
            assert!(descend(key, &patterns).len() <= patterns.len());
        }
    }

    #[test]
    fn test_hand_built_dotted_with_one_component_is_inert() {
        let patterns = vec![IgnorePattern::Dotted(vec!["a".into()])];
        assert!(!matches("a", &patterns));
        assert!(descend("a", &patterns).is_empty());
    }

    #[test]
    fn test_ignore_list_wraps_free_functions() {
        let list = IgnoreList::from_strs(["name", "*.metadata", "hobbies.sleeping"]);
        assert!(list.matches("name"));
        assert!(list.matches("metadata"));
        assert!(!list.matches("sleeping"));
        let hobbies = list.descend("hobbies");
        assert!(hobbies.matches("sleeping"));
        assert!(hobbies.matches("metadata"));
        assert!(!hobbies.matches("name"));
        assert_eq!(hobbies.len(), 2);
    }

    #[test]
    fn test_ignore_list_push_and_validate() {
        let mut list = IgnoreList::new();
        assert!(list.is_empty());
        list.push("*.metadata");
        list.push(IgnorePattern::parse("outer.id"));
        assert!(list.validate().is_ok());
        list.push("bad..pattern");
        assert!(list.validate().is_err());
    }
}
