//! Boundary contracts for the external screen host.
//!
//! # Responsibilities
//! - Define the capability surface the dispatcher consumes from the
//!   currently displayed screen
//! - Define the provider hook that supplies the current host per call
//! - Define the type tokens screens, sub-screens and host gating are
//!   keyed by
//!
//! # Design Decisions
//! - Hosts are trait objects supplied by the embedder; the engine never
//!   constructs one
//! - Type tokens are string-identity newtypes; there is no runtime
//!   subtype check, so a reusable host hierarchy is expressed by listing
//!   every concrete host type
//! - Commit ids use a sentinel invalid value rather than a Result so the
//!   host surface stays close to platform transaction APIs

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dispatch::factory::NavigationRequest;
use crate::typing::TypedValue;

/// Identity token for a top-level screen type.
///
/// Also identifies host types: a host is a top-level screen capable of
/// containing sub-screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenType(String);

impl ScreenType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity token for a sub-screen type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubScreenType(String);

impl SubScreenType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One allowed host type for a sub-screen route, with its gating params.
///
/// A gating param is a key the host requires before it is considered a
/// valid reuse or launch target. An empty `required_params` list means
/// the host type is always acceptable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSpec {
    /// The host (top-level screen) type.
    pub host_type: ScreenType,

    /// Keys that must be present in the typed params; for reuse they must
    /// also equal the value in the current host's launch arguments.
    pub required_params: Vec<String>,

    /// Keys the host consumes when present but does not require.
    pub optional_params: Vec<String>,
}

impl HostSpec {
    pub fn new(host_type: ScreenType) -> Self {
        Self {
            host_type,
            required_params: Vec::new(),
            optional_params: Vec::new(),
        }
    }
}

/// Identifier returned by a host display call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitId(pub i64);

impl CommitId {
    /// Sentinel returned when the host failed to display the sub-screen.
    pub const INVALID: CommitId = CommitId(-1);

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

/// A nested destination displayed inside a compatible host.
pub trait SubScreen: Send {
    fn sub_screen_type(&self) -> SubScreenType;
}

/// Capability surface of the currently displayed top-level screen.
///
/// Supplied by the embedder; every method is called synchronously on the
/// thread that invoked `handle()`.
pub trait Host: Send + Sync {
    /// Runtime type of this host.
    fn host_type(&self) -> ScreenType;

    /// True once the host's navigation state has been finalized or saved;
    /// a finalized host is never reused for sub-screen dispatch.
    fn is_navigation_state_finalized(&self) -> bool {
        false
    }

    /// Type of the sub-screen currently displayed, if any.
    fn active_sub_screen_type(&self) -> Option<SubScreenType> {
        None
    }

    /// Typed value the host was launched with for `key`, if any.
    fn launch_argument(&self, _key: &str) -> Option<TypedValue> {
        None
    }

    /// Close this host.
    fn finish(&self) {}

    /// Refresh the currently displayed content in place instead of
    /// navigating.
    fn refresh_in_place(&self, request: &NavigationRequest);

    /// Display `sub_screen`, destroying the currently displayed one.
    fn display_replacing_current(&self, _sub_screen: Box<dyn SubScreen>) -> CommitId {
        CommitId::INVALID
    }

    /// Display `sub_screen` on top of the currently displayed one.
    fn display_stacked(&self, _sub_screen: Box<dyn SubScreen>) -> CommitId {
        CommitId::INVALID
    }
}

/// Supplies the active host at dispatch time.
///
/// Returning `None` aborts dispatch; the handler reports the scheme as
/// not handled.
pub trait HostProvider: Send + Sync {
    fn current_host(&self) -> Option<Arc<dyn Host>>;
}
