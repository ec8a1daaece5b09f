//! Route table build and lookup.
//!
//! # Responsibilities
//! - Turn destination configs into route entries, one per action
//!   registration
//! - Order each action's entries by specificity, most required
//!   conditions first
//! - Serve lookups against the frozen table
//!
//! # Design Decisions
//! - Built once before the first `handle()` call, read-only thereafter;
//!   concurrent reads are safe without locking
//! - Ties in specificity keep registration order (stable sort), so a
//!   zero-condition fallback registered last stays last
//! - An unknown action yields an empty entry list, not an error

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::config::schema::DestinationConfig;
use crate::config::validation::{self, ValidationError};
use crate::routing::entry::RouteEntry;

/// Action name → priority-ordered route entries.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: HashMap<String, Vec<RouteEntry>>,
}

impl RouteTable {
    /// Build a table from statically registered destinations.
    ///
    /// Validation failures reject the whole table and report every
    /// violation, not just the first.
    pub fn build(destinations: Vec<DestinationConfig>) -> Result<Self, Vec<ValidationError>> {
        validation::validate(&destinations)?;

        let mut entries: HashMap<String, Vec<RouteEntry>> = HashMap::new();
        let mut total = 0usize;
        for destination in destinations {
            let (spec, registrations) = destination.into_spec();
            let spec = Arc::new(spec);
            for registration in registrations {
                entries
                    .entry(registration.action.clone())
                    .or_default()
                    .push(RouteEntry {
                        action: registration.action,
                        required: registration.required,
                        spec: Arc::clone(&spec),
                    });
                total += 1;
            }
        }

        for group in entries.values_mut() {
            // Stable: ties keep registration order.
            group.sort_by(|a, b| b.specificity().cmp(&a.specificity()));
        }

        info!(
            actions = entries.len(),
            entries = total,
            "route table built"
        );
        Ok(Self { entries })
    }

    /// Entries registered for `action`, most specific first.
    pub fn entries_for(&self, action: &str) -> &[RouteEntry] {
        self.entries.get(action).map_or(&[], Vec::as_slice)
    }

    pub fn exists(&self, action: &str) -> bool {
        self.entries.contains_key(action)
    }

    /// Number of registered entries across all actions.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
