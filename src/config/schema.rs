//! Registration schema definitions.
//!
//! This module defines the static data structure destinations are
//! registered with. All types derive Serde traits so registration data
//! can also be loaded from files.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dispatch::factory::FactoryKey;
use crate::host::{HostSpec, ScreenType, SubScreenType};
use crate::routing::entry::{
    DestinationSpec, RequiredConditions, ScreenRoute, SubScreenRoute, Variant,
};
use crate::routing::matcher::RouteMatcher;
use crate::typing::ValueConverter;

/// Handler orchestrator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Scheme prefix, e.g. "myapp://".
    pub prefix: String,

    /// Window within which an identical scheme string is suppressed as a
    /// duplicate trigger.
    pub debounce_window_ms: u64,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            debounce_window_ms: 1_000,
        }
    }
}

/// One action name a destination registers under, with its required
/// conditions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteRegistration {
    pub action: String,

    /// Key must be present; a non-null value must match the raw param
    /// exactly.
    #[serde(default)]
    pub required: RequiredConditions,
}

/// Dispatch variant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariantConfig {
    /// Navigate to a new top-level screen.
    Screen {
        target: ScreenType,
        #[serde(default)]
        factory: Option<FactoryKey>,
    },

    /// Navigate within a compatible host.
    SubScreen {
        target: SubScreenType,
        #[serde(default)]
        allowed_hosts: Vec<HostSpec>,
        #[serde(default)]
        force_new_host: bool,
        #[serde(default)]
        force_new_host_key: Option<String>,
        #[serde(default)]
        factory: Option<FactoryKey>,
    },
}

impl Default for VariantConfig {
    fn default() -> Self {
        VariantConfig::Screen {
            target: ScreenType::default(),
            factory: None,
        }
    }
}

/// One statically registered destination.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    /// Identifier for logging and validation messages.
    pub name: String,

    /// Action names this destination registers under. A destination may
    /// register several, each with its own required-condition set.
    pub routes: Vec<RouteRegistration>,

    pub int_keys: Vec<String>,
    pub bool_keys: Vec<String>,
    pub long_keys: Vec<String>,
    pub float_keys: Vec<String>,
    pub double_keys: Vec<String>,

    pub refresh_if_current: bool,

    pub variant: VariantConfig,

    /// Replaces default required-condition matching when set. Attached in
    /// code, not serialized.
    #[serde(skip)]
    pub matcher: Option<Arc<dyn RouteMatcher>>,

    /// Rewrites raw values before typing when set. Attached in code, not
    /// serialized.
    #[serde(skip)]
    pub converter: Option<Arc<dyn ValueConverter>>,
}

impl std::fmt::Debug for DestinationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationConfig")
            .field("name", &self.name)
            .field("routes", &self.routes)
            .field("variant", &self.variant)
            .field("refresh_if_current", &self.refresh_if_current)
            .field("has_matcher", &self.matcher.is_some())
            .field("has_converter", &self.converter.is_some())
            .finish_non_exhaustive()
    }
}

impl DestinationConfig {
    /// Split into the shared per-destination spec and the per-action
    /// registrations. Consumed by `RouteTable::build`.
    pub(crate) fn into_spec(self) -> (DestinationSpec, Vec<RouteRegistration>) {
        let variant = match self.variant {
            VariantConfig::Screen { target, factory } => {
                Variant::Screen(ScreenRoute { target, factory })
            }
            VariantConfig::SubScreen {
                target,
                allowed_hosts,
                force_new_host,
                force_new_host_key,
                factory,
            } => Variant::SubScreen(SubScreenRoute {
                target,
                allowed_hosts,
                force_new_host,
                force_new_host_key,
                factory,
            }),
        };
        let spec = DestinationSpec {
            name: self.name,
            int_keys: to_set(self.int_keys),
            bool_keys: to_set(self.bool_keys),
            long_keys: to_set(self.long_keys),
            float_keys: to_set(self.float_keys),
            double_keys: to_set(self.double_keys),
            matcher: self.matcher,
            converter: self.converter,
            refresh_if_current: self.refresh_if_current,
            variant,
        };
        (spec, self.routes)
    }
}

fn to_set(keys: Vec<String>) -> HashSet<String> {
    keys.into_iter().collect()
}
