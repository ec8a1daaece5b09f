//! Destination factories and their registry.
//!
//! # Responsibilities
//! - Define the two factory contracts, one per dispatch variant
//! - Resolve factory instances by key with lazy construct-and-cache
//! - Build navigation requests carrying the origin-tracking params
//!
//! # Design Decisions
//! - Explicit constructor registration replaces reflective
//!   construct-by-type; a key resolves to exactly one cached instance
//! - Factories are assumed stateless and reentrant; the cache hands out
//!   shared `Arc`s
//! - Constructor failure is an error value, logged by the callers and
//!   downgraded to "not handled"

use std::fmt;
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::{Host, HostSpec, ScreenType, SubScreen, SubScreenType};
use crate::scheme::reserved;
use crate::typing::{TypedParams, TypedValue};

/// Identity of a registered factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactoryKey(String);

impl FactoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for FactoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a navigation request asks the host layer to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A new top-level screen.
    Screen(ScreenType),

    /// A host launched to contain the given sub-screen.
    HostWithSubScreen {
        host: ScreenType,
        sub_screen: SubScreenType,
    },
}

/// The object handed to the external screen host to perform navigation.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    pub target: NavigationTarget,
    pub params: TypedParams,
}

impl NavigationRequest {
    /// Build a request, injecting the two origin-tracking params: the
    /// scheme-originated mark and the original raw scheme string.
    pub fn new(target: NavigationTarget, params: TypedParams, origin: &str) -> Self {
        let mut params = params;
        params.insert(reserved::FROM_SCHEME.to_string(), TypedValue::bool(true));
        params.insert(
            reserved::ORIGIN_SCHEME.to_string(),
            TypedValue::string(origin),
        );
        Self { target, params }
    }
}

/// Factory contract for screen-level dispatch.
pub trait ScreenFactory: Send + Sync {
    /// Returning true suppresses the jump: dispatch reports handled but
    /// performs no navigation.
    fn should_block_jump(
        &self,
        _host: &dyn Host,
        _target: &ScreenType,
        _params: &TypedParams,
    ) -> bool {
        false
    }

    /// Build the navigation request, or `None` when the target cannot be
    /// reached with these params.
    fn build_request(
        &self,
        host: &dyn Host,
        target: &ScreenType,
        params: &TypedParams,
        origin: &str,
    ) -> Option<NavigationRequest>;

    /// Perform the navigation.
    fn start_screen(&self, host: &dyn Host, request: NavigationRequest);
}

/// Factory contract for sub-screen dispatch.
pub trait SubScreenFactory: Send + Sync {
    /// Build a request launching one of the allowed host types carrying
    /// the sub-screen. Hosts are tried in declaration order; the first
    /// one whose required gating keys are all present wins.
    fn build_host_request(
        &self,
        _host: &dyn Host,
        allowed_hosts: &[HostSpec],
        target: &SubScreenType,
        params: &TypedParams,
        origin: &str,
    ) -> Option<NavigationRequest> {
        let selected = super::subscreen::select_host(allowed_hosts, params)?;
        Some(NavigationRequest::new(
            NavigationTarget::HostWithSubScreen {
                host: selected.host_type.clone(),
                sub_screen: target.clone(),
            },
            params.clone(),
            origin,
        ))
    }

    /// Launch the host described by `request`.
    fn start_host(&self, host: &dyn Host, request: NavigationRequest);

    /// Construct a new sub-screen instance for display inside the current
    /// host.
    fn build_sub_screen(
        &self,
        target: &SubScreenType,
        params: &TypedParams,
    ) -> Option<Box<dyn SubScreen>>;
}

/// Why a factory could not be resolved.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("no factory registered for key `{0}`")]
    NotRegistered(FactoryKey),

    #[error("no default {0} factory registered")]
    NoDefault(&'static str),

    #[error("factory `{key}` construction failed: {reason}")]
    Construction { key: FactoryKey, reason: String },
}

type ScreenCtor = Box<dyn Fn() -> Result<Arc<dyn ScreenFactory>, String> + Send + Sync>;
type SubScreenCtor = Box<dyn Fn() -> Result<Arc<dyn SubScreenFactory>, String> + Send + Sync>;

/// Explicit factory registry with a lazy per-key singleton cache.
#[derive(Default)]
pub struct FactoryRegistry {
    screen_ctors: DashMap<FactoryKey, ScreenCtor>,
    sub_screen_ctors: DashMap<FactoryKey, SubScreenCtor>,
    screen_cache: DashMap<FactoryKey, Arc<dyn ScreenFactory>>,
    sub_screen_cache: DashMap<FactoryKey, Arc<dyn SubScreenFactory>>,
    default_screen: RwLock<Option<Arc<dyn ScreenFactory>>>,
    default_sub_screen: RwLock<Option<Arc<dyn SubScreenFactory>>>,
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("screen_ctors", &self.screen_ctors.len())
            .field("sub_screen_ctors", &self.sub_screen_ctors.len())
            .field("screen_cached", &self.screen_cache.len())
            .field("sub_screen_cached", &self.sub_screen_cache.len())
            .finish()
    }
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen factory constructor under `key`. The instance is
    /// constructed on first use and cached.
    pub fn register_screen<F>(&self, key: FactoryKey, ctor: F)
    where
        F: Fn() -> Result<Arc<dyn ScreenFactory>, String> + Send + Sync + 'static,
    {
        self.screen_ctors.insert(key, Box::new(ctor));
    }

    /// Register a sub-screen factory constructor under `key`.
    pub fn register_sub_screen<F>(&self, key: FactoryKey, ctor: F)
    where
        F: Fn() -> Result<Arc<dyn SubScreenFactory>, String> + Send + Sync + 'static,
    {
        self.sub_screen_ctors.insert(key, Box::new(ctor));
    }

    /// Process-wide default used by screen routes without a factory key.
    pub fn set_default_screen(&self, factory: Arc<dyn ScreenFactory>) {
        *self.default_screen.write().unwrap() = Some(factory);
    }

    /// Process-wide default used by sub-screen routes without a factory
    /// key.
    pub fn set_default_sub_screen(&self, factory: Arc<dyn SubScreenFactory>) {
        *self.default_sub_screen.write().unwrap() = Some(factory);
    }

    /// Resolve the screen factory for an entry; `None` selects the
    /// default.
    pub fn screen_factory(
        &self,
        key: Option<&FactoryKey>,
    ) -> Result<Arc<dyn ScreenFactory>, FactoryError> {
        match key {
            None => self
                .default_screen
                .read()
                .unwrap()
                .clone()
                .ok_or(FactoryError::NoDefault("screen")),
            Some(key) => {
                if let Some(cached) = self.screen_cache.get(key) {
                    return Ok(Arc::clone(&cached));
                }
                let ctor = self
                    .screen_ctors
                    .get(key)
                    .ok_or_else(|| FactoryError::NotRegistered(key.clone()))?;
                let instance = (ctor.value())().map_err(|reason| FactoryError::Construction {
                    key: key.clone(),
                    reason,
                })?;
                self.screen_cache.insert(key.clone(), Arc::clone(&instance));
                Ok(instance)
            }
        }
    }

    /// Resolve the sub-screen factory for an entry; `None` selects the
    /// default.
    pub fn sub_screen_factory(
        &self,
        key: Option<&FactoryKey>,
    ) -> Result<Arc<dyn SubScreenFactory>, FactoryError> {
        match key {
            None => self
                .default_sub_screen
                .read()
                .unwrap()
                .clone()
                .ok_or(FactoryError::NoDefault("sub-screen")),
            Some(key) => {
                if let Some(cached) = self.sub_screen_cache.get(key) {
                    return Ok(Arc::clone(&cached));
                }
                let ctor = self
                    .sub_screen_ctors
                    .get(key)
                    .ok_or_else(|| FactoryError::NotRegistered(key.clone()))?;
                let instance = (ctor.value())().map_err(|reason| FactoryError::Construction {
                    key: key.clone(),
                    reason,
                })?;
                self.sub_screen_cache
                    .insert(key.clone(), Arc::clone(&instance));
                Ok(instance)
            }
        }
    }
}
