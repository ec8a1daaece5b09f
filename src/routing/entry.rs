//! Route entry data model.
//!
//! # Responsibilities
//! - Hold one registered destination's match conditions, type
//!   declarations and dispatch variant
//! - Share per-destination data across the entries created for its
//!   action registrations
//!
//! # Design Decisions
//! - The two dispatch variants are a tagged union, not an inheritance
//!   hierarchy; dispatch pattern-matches on the variant
//! - Entries are created once at table-build time and immutable for the
//!   process lifetime

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::dispatch::factory::FactoryKey;
use crate::host::{HostSpec, ScreenType, SubScreenType};
use crate::routing::matcher::RouteMatcher;
use crate::typing::ValueConverter;

/// Match conditions for one action registration: key must be present;
/// a non-`None` value must additionally equal the raw param exactly.
pub type RequiredConditions = BTreeMap<String, Option<String>>;

/// Screen-level dispatch: navigate to a new top-level screen.
#[derive(Debug, Clone)]
pub struct ScreenRoute {
    pub target: ScreenType,

    /// Custom factory key; the process-wide default factory is used when
    /// absent.
    pub factory: Option<FactoryKey>,
}

/// Sub-screen dispatch: navigate within a compatible host.
#[derive(Debug, Clone)]
pub struct SubScreenRoute {
    pub target: SubScreenType,

    /// Compatible host types in declaration order. Never empty; enforced
    /// at table-build time.
    pub allowed_hosts: Vec<HostSpec>,

    /// Always launch a new host, even when the current one is reusable.
    pub force_new_host: bool,

    /// Overrides the reserved force-new-host param key for this route.
    pub force_new_host_key: Option<String>,

    pub factory: Option<FactoryKey>,
}

/// The dispatch variant of a route entry.
#[derive(Debug, Clone)]
pub enum Variant {
    Screen(ScreenRoute),
    SubScreen(SubScreenRoute),
}

/// Per-destination data shared by all entries the destination registers.
#[derive(Debug)]
pub struct DestinationSpec {
    /// Destination identifier for logging.
    pub name: String,

    pub int_keys: HashSet<String>,
    pub bool_keys: HashSet<String>,
    pub long_keys: HashSet<String>,
    pub float_keys: HashSet<String>,
    pub double_keys: HashSet<String>,

    /// When set, replaces default required-condition matching outright.
    pub matcher: Option<Arc<dyn RouteMatcher>>,

    /// When set, rewrites each raw value before typing.
    pub converter: Option<Arc<dyn ValueConverter>>,

    /// Refresh the current screen in place instead of navigating when it
    /// already displays the target.
    pub refresh_if_current: bool,

    pub variant: Variant,
}

/// One registered destination under one action name.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub action: String,
    pub required: RequiredConditions,
    pub spec: Arc<DestinationSpec>,
}

impl RouteEntry {
    /// Specificity used for priority ordering: more required conditions
    /// are tried first.
    pub fn specificity(&self) -> usize {
        self.required.len()
    }
}
