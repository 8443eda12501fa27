//! Result rows and dotted-path resolution.
//!
//! The search endpoint returns schema-less JSON trees keyed by the requested
//! table aliases (`campaign`, `customer`, ...). Query field paths are
//! written in snake_case (`campaign_criterion.criterion_id`) while response
//! keys are camelCase (`campaignCriterion.criterionId`), so path resolution
//! converts each segment before descending.
//!
//! Resolution is total: a missing segment yields `None` rather than an
//! error. Whether a missing value matters is the caller's decision (a join
//! key that resolves to `None` simply never matches).

use inflector::Inflector;
use serde_json::Value;

/// A raw result row: an arbitrarily nested JSON tree.
pub type AdsRow = Value;

/// Walk a dotted snake_case path into a row.
///
/// Each segment is tried in camelCase first, then verbatim, so rows that
/// already use snake_case keys (hand-built fixtures, SA360 oddities) still
/// resolve.
pub fn resolve_path<'a>(row: &'a AdsRow, path: &str) -> Option<&'a Value> {
    let mut current = row;
    for segment in path.split('.') {
        let camel = segment.to_camel_case();
        current = current
            .get(camel.as_str())
            .or_else(|| current.get(segment))?;
    }
    Some(current)
}

/// Render a leaf value as a string, if it is a scalar.
///
/// Objects and arrays yield `None`; a dotted path that stops short of a
/// leaf is not a usable key or output value.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

/// Resolve a dotted path to a scalar string in one step.
pub fn path_string(row: &AdsRow, path: &str) -> Option<String> {
    resolve_path(row, path).and_then(scalar_string)
}
