//! Scheme string parsing and re-serialization.
//!
//! # Responsibilities
//! - Reject strings that do not carry the configured prefix
//! - Split the remainder into action and query part
//! - Scan the query part into a key → value map
//!
//! # Design Decisions
//! - Segment scan is a single left-to-right pass: split on `&`, then on
//!   the first `=` within each segment
//! - Malformed segments are skipped, never fatal: empty segments (`&&`,
//!   leading `&`) and empty keys (`=v`) are dropped
//! - No escaping or decoding of any kind

use std::collections::BTreeMap;

use thiserror::Error;

/// Raw query parameters. Sorted iteration keeps re-serialization
/// deterministic.
pub type RawParams = BTreeMap<String, String>;

/// A parsed scheme: the action name and its raw parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScheme {
    pub action: String,
    pub params: RawParams,
}

/// Reasons a string cannot be parsed as a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string does not start with the configured prefix. A skip
    /// signal rather than a malformed input.
    #[error("scheme does not start with the configured prefix")]
    PrefixMismatch,

    /// The string carries the prefix but no action name.
    #[error("scheme action is empty")]
    EmptyAction,
}

/// Parse `raw` as `prefix + action + "?" + query`.
pub fn parse(raw: &str, prefix: &str) -> Result<RawScheme, ParseError> {
    let rest = raw.strip_prefix(prefix).ok_or(ParseError::PrefixMismatch)?;

    let (action, query) = match rest.split_once('?') {
        Some((action, query)) => (action, query),
        None => (rest, ""),
    };
    if action.is_empty() {
        return Err(ParseError::EmptyAction);
    }

    let mut params = RawParams::new();
    for segment in query.split('&') {
        if segment.is_empty() {
            continue;
        }
        let (key, value) = match segment.split_once('=') {
            Some((key, value)) => (key, value),
            None => (segment, ""),
        };
        if key.is_empty() {
            continue;
        }
        // Later occurrences of a duplicate key overwrite earlier ones.
        params.insert(key.to_string(), value.to_string());
    }

    Ok(RawScheme {
        action: action.to_string(),
        params,
    })
}

impl RawScheme {
    /// Re-serialize into the wire format, keys sorted.
    pub fn to_scheme_string(&self, prefix: &str) -> String {
        let mut out = String::with_capacity(prefix.len() + self.action.len());
        out.push_str(prefix);
        out.push_str(&self.action);
        let mut first = true;
        for (key, value) in &self.params {
            out.push(if first { '?' } else { '&' });
            first = false;
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}
