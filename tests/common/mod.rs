//! Shared mock collaborators for integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use scheme_router::{
    CommitId, FactoryRegistry, Host, HostProvider, NavigationRequest, NavigationTarget,
    ScreenFactory, ScreenType, SubScreen, SubScreenFactory, SubScreenType, TypedParams,
    TypedValue,
};

/// A configurable fake screen host recording every call made to it.
pub struct MockHost {
    pub host_type: ScreenType,
    pub finalized: bool,
    pub active_sub_screen: Option<SubScreenType>,
    pub launch_args: Vec<(String, TypedValue)>,
    pub display_result: CommitId,
    pub refreshes: AtomicU32,
    pub finishes: AtomicU32,
    pub replaced: AtomicU32,
    pub stacked: AtomicU32,
}

impl MockHost {
    pub fn new(name: &str) -> Self {
        Self {
            host_type: ScreenType::new(name),
            finalized: false,
            active_sub_screen: None,
            launch_args: Vec::new(),
            display_result: CommitId(1),
            refreshes: AtomicU32::new(0),
            finishes: AtomicU32::new(0),
            replaced: AtomicU32::new(0),
            stacked: AtomicU32::new(0),
        }
    }
}

impl Host for MockHost {
    fn host_type(&self) -> ScreenType {
        self.host_type.clone()
    }

    fn is_navigation_state_finalized(&self) -> bool {
        self.finalized
    }

    fn active_sub_screen_type(&self) -> Option<SubScreenType> {
        self.active_sub_screen.clone()
    }

    fn launch_argument(&self, key: &str) -> Option<TypedValue> {
        self.launch_args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn finish(&self) {
        self.finishes.fetch_add(1, Ordering::SeqCst);
    }

    fn refresh_in_place(&self, _request: &NavigationRequest) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }

    fn display_replacing_current(&self, _sub_screen: Box<dyn SubScreen>) -> CommitId {
        self.replaced.fetch_add(1, Ordering::SeqCst);
        self.display_result
    }

    fn display_stacked(&self, _sub_screen: Box<dyn SubScreen>) -> CommitId {
        self.stacked.fetch_add(1, Ordering::SeqCst);
        self.display_result
    }
}

/// Provider returning a fixed host (or none).
pub struct FixedProvider(pub Option<Arc<dyn Host>>);

impl HostProvider for FixedProvider {
    fn current_host(&self) -> Option<Arc<dyn Host>> {
        self.0.clone()
    }
}

pub struct MockSubScreen(pub SubScreenType);

impl SubScreen for MockSubScreen {
    fn sub_screen_type(&self) -> SubScreenType {
        self.0.clone()
    }
}

/// Screen factory counting constructions of requests and navigations,
/// and remembering the last request it built.
#[derive(Default)]
pub struct CountingScreenFactory {
    pub builds: AtomicU32,
    pub starts: AtomicU32,
    pub last_request: Mutex<Option<NavigationRequest>>,
}

impl ScreenFactory for CountingScreenFactory {
    fn build_request(
        &self,
        _host: &dyn Host,
        target: &ScreenType,
        params: &TypedParams,
        origin: &str,
    ) -> Option<NavigationRequest> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Some(NavigationRequest::new(
            NavigationTarget::Screen(target.clone()),
            params.clone(),
            origin,
        ))
    }

    fn start_screen(&self, _host: &dyn Host, request: NavigationRequest) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
    }
}

/// Sub-screen factory relying on the default host-selection logic.
#[derive(Default)]
pub struct CountingSubScreenFactory {
    pub host_starts: AtomicU32,
    pub sub_screen_builds: AtomicU32,
    pub launched: Mutex<Vec<NavigationTarget>>,
}

impl SubScreenFactory for CountingSubScreenFactory {
    fn start_host(&self, _host: &dyn Host, request: NavigationRequest) {
        self.host_starts.fetch_add(1, Ordering::SeqCst);
        self.launched.lock().unwrap().push(request.target);
    }

    fn build_sub_screen(
        &self,
        target: &SubScreenType,
        _params: &TypedParams,
    ) -> Option<Box<dyn SubScreen>> {
        self.sub_screen_builds.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(MockSubScreen(target.clone())))
    }
}

/// Registry preloaded with the two counting default factories.
pub fn counting_registry() -> (
    FactoryRegistry,
    Arc<CountingScreenFactory>,
    Arc<CountingSubScreenFactory>,
) {
    let registry = FactoryRegistry::new();
    let screen = Arc::new(CountingScreenFactory::default());
    let sub_screen = Arc::new(CountingSubScreenFactory::default());
    registry.set_default_screen(screen.clone());
    registry.set_default_sub_screen(sub_screen.clone());
    (registry, screen, sub_screen)
}
