//! Core logic behind the `jsondrift` binary.
//!
//! Every command takes JSON text and returns JSON text, so the binary only
//! reads inputs and prints results:
//! - `delta`: compare recorded and actual documents
//! - `filter`: strip ignored fields from a document
//! - `patch`: synthesize patch operations
//! - `suppress`: decide whether a diff between two texts is noise

use jsondrift_ignore::{validate_ignore_list, IgnoreList, ValidationError};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::delta::delta_observed;
use crate::envelope::EnvelopeStrategy;
use crate::filter::project;
use crate::observer::TracingObserver;
use crate::patch::{synthesize_observed, PatchFormat};
use crate::suppress::suppress_diff;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] ValidationError),
    #[error("{0} document must be a JSON object")]
    NotAnObject(&'static str),
}

fn parse_object(text: &str, what: &'static str) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::NotAnObject(what)),
    }
}

fn parse_patterns(patterns: &[String]) -> Result<IgnoreList, CliError> {
    validate_ignore_list(patterns)?;
    Ok(IgnoreList::from_strs(patterns))
}

// ── delta ─────────────────────────────────────────────────────────────────

/// Compare two documents. Returns the merged document, pretty-printed, and
/// whether anything outside the ignore list changed.
pub fn run_delta(recorded: &str, actual: &str, patterns: &[String]) -> Result<(String, bool), CliError> {
    let recorded = parse_object(recorded, "recorded")?;
    let actual = parse_object(actual, "actual")?;
    let patterns = parse_patterns(patterns)?;
    let d = delta_observed(&recorded, &actual, patterns.as_slice(), &mut TracingObserver);
    let changed = d.changed;
    Ok((serde_json::to_string_pretty(&d.into_value())?, changed))
}

// ── filter ────────────────────────────────────────────────────────────────

/// Strip ignored fields from a document. `null` passes through.
pub fn run_filter(doc: &str, patterns: &[String]) -> Result<String, CliError> {
    let patterns = parse_patterns(patterns)?;
    let out = match serde_json::from_str::<Value>(doc)? {
        Value::Object(map) => Value::Object(project(&map, patterns.as_slice())),
        Value::Null => Value::Null,
        _ => return Err(CliError::NotAnObject("input")),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

// ── patch ─────────────────────────────────────────────────────────────────

/// Synthesize the operations that move `actual` to `desired`, encoded in
/// `format`, as a pretty-printed JSON array.
pub fn run_patch(
    desired: &str,
    actual: &str,
    patterns: &[String],
    id_attribute: &str,
    format: PatchFormat,
) -> Result<String, CliError> {
    let desired = parse_object(desired, "desired")?;
    let actual = parse_object(actual, "actual")?;
    let patterns = parse_patterns(patterns)?;
    let ops = synthesize_observed(
        &desired,
        &actual,
        patterns.as_slice(),
        id_attribute,
        &EnvelopeStrategy::default(),
        &mut TracingObserver,
    );
    let encoded: Vec<Value> = ops.iter().map(|op| format.encode(op)).collect();
    Ok(serde_json::to_string_pretty(&encoded)?)
}

// ── suppress ──────────────────────────────────────────────────────────────

/// True when the diff between `old` and `new` would only show formatting or
/// ignored fields.
pub fn run_suppress(old: &str, new: &str, patterns: &[String]) -> Result<bool, CliError> {
    let patterns = parse_patterns(patterns)?;
    Ok(suppress_diff(old, new, patterns.as_slice()))
}

// ── logging ───────────────────────────────────────────────────────────────

/// The log filter for the binary: `RUST_LOG`-style directives in `env` win
/// when they parse, otherwise `debug` with `verbose` and `info` without.
pub fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    env.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

// ── Tests ─────────────────────────────────────────────────────────────────
