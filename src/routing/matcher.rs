//! Route matching logic.
//!
//! # Responsibilities
//! - Apply an entry's custom matcher when one is declared
//! - Otherwise match raw params against the entry's required conditions
//! - Walk an action's entry list in stored order and return the first
//!   match
//!
//! # Design Decisions
//! - Required-condition values compare as raw strings; no type coercion
//!   happens before an entry is selected
//! - A declared custom matcher is applied exclusively; required
//!   conditions on the same entry still count toward priority ordering
//!   but are not re-checked

use crate::routing::entry::{RequiredConditions, RouteEntry};
use crate::routing::table::RouteTable;
use crate::scheme::RawParams;

/// Pluggable per-entry match condition.
pub trait RouteMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if `entry` should handle a scheme with `params`.
    fn matches(&self, entry: &RouteEntry, params: &RawParams) -> bool;
}

/// Default matching: every required key present; a non-`None` expected
/// value must equal the raw param exactly.
pub fn default_matches(required: &RequiredConditions, params: &RawParams) -> bool {
    required
        .iter()
        .all(|(key, expected)| match (params.get(key), expected) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
}

fn entry_matches(entry: &RouteEntry, params: &RawParams) -> bool {
    match &entry.spec.matcher {
        Some(matcher) => matcher.matches(entry, params),
        None => default_matches(&entry.required, params),
    }
}

/// Resolve the first entry registered for `action` whose conditions hold.
///
/// Returns `None` for an unknown action or when no entry matches.
pub fn resolve<'t>(
    table: &'t RouteTable,
    action: &str,
    params: &RawParams,
) -> Option<&'t RouteEntry> {
    table
        .entries_for(action)
        .iter()
        .find(|entry| entry_matches(entry, params))
}
