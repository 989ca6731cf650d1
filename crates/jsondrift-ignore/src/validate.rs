//! Validation functions for ignore patterns.
//!
//! The matcher accepts every string, so validation is opt-in: configuration
//! layers call it to reject patterns that can never match anything useful.

use thiserror::Error;

use crate::types::SEPARATOR;

/// Maximum allowed pattern string length.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of dotted components.
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty ignore pattern")]
    Empty,
    #[error("ignore pattern is longer than 1024 bytes")]
    TooLong,
    #[error("ignore pattern '{0}' has more than 256 components")]
    TooDeep(String),
    #[error("ignore pattern '{0}' has an empty path component")]
    EmptyComponent(String),
    #[error("ignore pattern '{0}' must use '*' only as '*.<field>'")]
    MisplacedWildcard(String),
}

/// Validate an ignore pattern string.
///
/// # Errors
///
/// Returns an error if:
/// - The pattern is empty or longer than 1024 bytes
/// - A dotted component is empty (`a..b`, `.a`, `a.`)
/// - `*` appears anywhere other than directly before the last component
///
/// # Example
///
/// ```
/// use jsondrift_ignore::validate_ignore_pattern;
///
/// validate_ignore_pattern("*.metadata").unwrap();
/// validate_ignore_pattern("outer.*.id").unwrap();
/// validate_ignore_pattern("a..b").unwrap_err();
/// validate_ignore_pattern("*").unwrap_err();
/// ```
pub fn validate_ignore_pattern(pattern: &str) -> Result<(), ValidationError> {
    if pattern.is_empty() {
        return Err(ValidationError::Empty);
    }
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(ValidationError::TooLong);
    }
    let components: Vec<&str> = pattern.split(SEPARATOR).collect();
    if components.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::TooDeep(pattern.to_string()));
    }
    if components.iter().any(|c| c.is_empty()) {
        return Err(ValidationError::EmptyComponent(pattern.to_string()));
    }
    let last = components.len() - 1;
    for (i, component) in components.iter().enumerate() {
        if component.contains('*') && (*component != "*" || i + 1 != last) {
            return Err(ValidationError::MisplacedWildcard(pattern.to_string()));
        }
    }
    Ok(())
}

/// Validate a list of ignore pattern strings, stopping at the first error.
pub fn validate_ignore_list<S: AsRef<str>>(patterns: &[S]) -> Result<(), ValidationError> {
    patterns
        .iter()
        .try_for_each(|p| validate_ignore_pattern(p.as_ref()))
}
