//! Handler orchestrator subsystem.
//!
//! # Data Flow
//! ```text
//! handle(raw)
//!     → prefix check / current-host check (miss → false)
//!     → debounce check (identical raw inside window → true, no dispatch)
//!     → scheme parse
//!     → pre-interceptors in registration order (first true short-circuits)
//!     → route resolution → param typing → variant dispatch
//!     → fallback interceptor (only if still unhandled)
//!     → record raw + timestamp on success
//! ```
//!
//! # Design Decisions
//! - `handle()` runs to completion on the calling thread; no suspension,
//!   no I/O, no retries
//! - Only the debounce fields mutate after construction, behind a Mutex
//! - All failures surface as `handled = false` plus logging; nothing
//!   crosses the `handle()` boundary

pub mod global;
pub mod interceptor;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::schema::HandlerConfig;
use crate::dispatch::factory::FactoryRegistry;
use crate::dispatch::{screen, subscreen};
use crate::host::HostProvider;
use crate::routing::entry::Variant;
use crate::routing::matcher;
use crate::routing::table::RouteTable;
use crate::scheme::parser;
use crate::typing::coerce;

pub use interceptor::Interceptor;

#[derive(Debug, Default)]
struct DebounceState {
    last_raw: Option<String>,
    last_at: Option<Instant>,
}

/// The top-level scheme handler: owns the prefix, the debounce window,
/// the interceptor chain, the route table and the factory registry.
pub struct SchemeHandler {
    config: HandlerConfig,
    table: RouteTable,
    factories: FactoryRegistry,
    host_provider: Arc<dyn HostProvider>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    fallback: Option<Arc<dyn Interceptor>>,
    debounce: Mutex<DebounceState>,
}

impl SchemeHandler {
    pub fn new(
        config: HandlerConfig,
        table: RouteTable,
        factories: FactoryRegistry,
        host_provider: Arc<dyn HostProvider>,
    ) -> Self {
        Self {
            config,
            table,
            factories,
            host_provider,
            interceptors: Vec::new(),
            fallback: None,
            debounce: Mutex::new(DebounceState::default()),
        }
    }

    /// Append a pre-interceptor; interceptors run in registration order.
    pub fn add_interceptor(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Interceptor consulted only when nothing else handled the scheme.
    pub fn set_fallback(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.fallback = Some(interceptor);
    }

    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn factories(&self) -> &FactoryRegistry {
        &self.factories
    }

    /// Route and dispatch one scheme string. Returns whether it was
    /// handled.
    pub fn handle(&self, raw: &str) -> bool {
        if !raw.starts_with(&self.config.prefix) {
            return false;
        }
        let Some(host) = self.host_provider.current_host() else {
            debug!(raw, "no current host, scheme not handled");
            return false;
        };

        if self.is_duplicate_trigger(raw) {
            debug!(raw, "duplicate scheme inside debounce window, suppressed");
            return true;
        }

        let scheme = match parser::parse(raw, &self.config.prefix) {
            Ok(scheme) => scheme,
            Err(error) => {
                debug!(raw, %error, "scheme rejected by parser");
                return false;
            }
        };

        let mut handled = false;
        for interceptor in &self.interceptors {
            if interceptor.intercept(self, host.as_ref(), &scheme, raw) {
                debug!(action = %scheme.action, "scheme handled by interceptor");
                handled = true;
                break;
            }
        }

        if !handled {
            if let Some(entry) = matcher::resolve(&self.table, &scheme.action, &scheme.params) {
                let typed = coerce::type_params(&scheme.params, entry);
                handled = match &entry.spec.variant {
                    Variant::Screen(route) => screen::dispatch(
                        route,
                        &entry.spec,
                        host.as_ref(),
                        &typed,
                        raw,
                        &self.factories,
                    ),
                    Variant::SubScreen(route) => subscreen::dispatch(
                        route,
                        &entry.spec,
                        host.as_ref(),
                        &typed,
                        raw,
                        &self.factories,
                    ),
                };
            } else {
                debug!(action = %scheme.action, "no route matched");
            }
        }

        if !handled {
            if let Some(fallback) = &self.fallback {
                handled = fallback.intercept(self, host.as_ref(), &scheme, raw);
            }
        }

        if handled {
            self.record_handled(raw);
        }
        handled
    }

    fn is_duplicate_trigger(&self, raw: &str) -> bool {
        let window = Duration::from_millis(self.config.debounce_window_ms);
        let state = self.debounce.lock().unwrap();
        match (&state.last_raw, state.last_at) {
            (Some(last_raw), Some(last_at)) => {
                last_raw == raw && last_at.elapsed() < window
            }
            _ => false,
        }
    }

    fn record_handled(&self, raw: &str) {
        let mut state = self.debounce.lock().unwrap();
        state.last_raw = Some(raw.to_string());
        state.last_at = Some(Instant::now());
    }
}

impl std::fmt::Debug for SchemeHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeHandler")
            .field("prefix", &self.config.prefix)
            .field("debounce_window_ms", &self.config.debounce_window_ms)
            .field("routes", &self.table.len())
            .field("interceptors", &self.interceptors.len())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::config::schema::{DestinationConfig, RouteRegistration, VariantConfig};
    use crate::dispatch::factory::{NavigationRequest, NavigationTarget, ScreenFactory};
    use crate::host::{Host, ScreenType};
    use crate::scheme::RawScheme;
    use crate::typing::{TypedParams, Value};

    struct StaticHost;

    impl Host for StaticHost {
        fn host_type(&self) -> ScreenType {
            ScreenType::new("MainScreen")
        }

        fn refresh_in_place(&self, _request: &NavigationRequest) {}
    }

    struct StaticProvider(Option<Arc<dyn Host>>);

    impl HostProvider for StaticProvider {
        fn current_host(&self) -> Option<Arc<dyn Host>> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct CountingFactory {
        builds: AtomicU32,
        starts: AtomicU32,
    }

    impl ScreenFactory for CountingFactory {
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

        fn start_screen(&self, _host: &dyn Host, _request: NavigationRequest) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn destination(name: &str, action: &str, int_keys: &[&str]) -> DestinationConfig {
        DestinationConfig {
            name: name.to_string(),
            routes: vec![RouteRegistration {
                action: action.to_string(),
                required: Default::default(),
            }],
            int_keys: int_keys.iter().map(|k| k.to_string()).collect(),
            variant: VariantConfig::Screen {
                target: ScreenType::new(name),
                factory: None,
            },
            ..Default::default()
        }
    }

    fn handler_with(
        factory: Arc<CountingFactory>,
        destinations: Vec<DestinationConfig>,
    ) -> SchemeHandler {
        let table = RouteTable::build(destinations).unwrap();
        let factories = FactoryRegistry::new();
        factories.set_default_screen(factory);
        SchemeHandler::new(
            HandlerConfig {
                prefix: "myapp://".into(),
                debounce_window_ms: 60_000,
            },
            table,
            factories,
            Arc::new(StaticProvider(Some(Arc::new(StaticHost)))),
        )
    }

    #[test]
    fn foreign_prefix_is_not_handled_and_mutates_nothing() {
        let factory = Arc::new(CountingFactory::default());
        let handler = handler_with(Arc::clone(&factory), vec![destination("S", "open", &[])]);

        assert!(!handler.handle("otherapp://open"));
        assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
        let state = handler.debounce.lock().unwrap();
        assert!(state.last_raw.is_none());
    }

    #[test]
    fn missing_host_aborts_dispatch() {
        let table = RouteTable::build(vec![destination("S", "open", &[])]).unwrap();
        let handler = SchemeHandler::new(
            HandlerConfig {
                prefix: "myapp://".into(),
                ..Default::default()
            },
            table,
            FactoryRegistry::new(),
            Arc::new(StaticProvider(None)),
        );
        assert!(!handler.handle("myapp://open"));
    }

    #[test]
    fn unknown_action_without_fallback_is_false() {
        let factory = Arc::new(CountingFactory::default());
        let handler = handler_with(factory, vec![destination("S", "open", &[])]);
        assert!(!handler.handle("myapp://nope"));
    }

    #[test]
    fn dispatches_matched_route_with_typed_params() {
        let factory = Arc::new(CountingFactory::default());
        let handler = handler_with(Arc::clone(&factory), vec![destination("S", "open", &["id"])]);

        assert!(handler.handle("myapp://open?id=42"));
        assert_eq!(factory.starts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debounce_suppresses_identical_raw_within_window() {
        let factory = Arc::new(CountingFactory::default());
        let handler = handler_with(Arc::clone(&factory), vec![destination("S", "open", &[])]);

        assert!(handler.handle("myapp://open?id=1"));
        assert!(handler.handle("myapp://open?id=1"));
        // Second call returned true without touching the factory again.
        assert_eq!(factory.builds.load(Ordering::SeqCst), 1);
        assert_eq!(factory.starts.load(Ordering::SeqCst), 1);

        // A different raw string is not a duplicate.
        assert!(handler.handle("myapp://open?id=2"));
        assert_eq!(factory.starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unhandled_schemes_are_not_recorded_for_debounce() {
        let factory = Arc::new(CountingFactory::default());
        let handler = handler_with(Arc::clone(&factory), vec![destination("S", "open", &[])]);

        assert!(!handler.handle("myapp://nope"));
        assert!(!handler.handle("myapp://nope"));
        let state = handler.debounce.lock().unwrap();
        assert!(state.last_raw.is_none());
    }

    struct CountingInterceptor {
        hits: AtomicU32,
        result: bool,
    }

    impl Interceptor for CountingInterceptor {
        fn intercept(
            &self,
            _handler: &SchemeHandler,
            _host: &dyn Host,
            _scheme: &RawScheme,
            _raw: &str,
        ) -> bool {
            self.hits.fetch_add(1, Ordering::SeqCst);
            self.result
        }
    }

    #[test]
    fn interceptor_short_circuits_dispatch() {
        let factory = Arc::new(CountingFactory::default());
        let mut handler = handler_with(Arc::clone(&factory), vec![destination("S", "open", &[])]);
        let first = Arc::new(CountingInterceptor {
            hits: AtomicU32::new(0),
            result: true,
        });
        let second = Arc::new(CountingInterceptor {
            hits: AtomicU32::new(0),
            result: true,
        });
        handler.add_interceptor(first.clone());
        handler.add_interceptor(second.clone());

        assert!(handler.handle("myapp://open"));
        assert_eq!(first.hits.load(Ordering::SeqCst), 1);
        // The chain stops at the first interceptor that handles.
        assert_eq!(second.hits.load(Ordering::SeqCst), 0);
        assert_eq!(factory.starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn declining_interceptor_lets_dispatch_proceed() {
        let factory = Arc::new(CountingFactory::default());
        let mut handler = handler_with(Arc::clone(&factory), vec![destination("S", "open", &[])]);
        let observer = Arc::new(CountingInterceptor {
            hits: AtomicU32::new(0),
            result: false,
        });
        handler.add_interceptor(observer.clone());

        assert!(handler.handle("myapp://open"));
        assert_eq!(observer.hits.load(Ordering::SeqCst), 1);
        assert_eq!(factory.starts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fallback_runs_only_when_unhandled() {
        let factory = Arc::new(CountingFactory::default());
        let mut handler = handler_with(Arc::clone(&factory), vec![destination("S", "open", &[])]);
        let fallback = Arc::new(CountingInterceptor {
            hits: AtomicU32::new(0),
            result: true,
        });
        handler.set_fallback(fallback.clone());

        // Matched action: fallback untouched.
        assert!(handler.handle("myapp://open"));
        assert_eq!(fallback.hits.load(Ordering::SeqCst), 0);

        // Unknown action: fallback decides.
        assert!(handler.handle("myapp://nope"));
        assert_eq!(fallback.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn typed_params_reach_the_factory() {
        struct AssertingFactory;

        impl ScreenFactory for AssertingFactory {
            fn build_request(
                &self,
                _host: &dyn Host,
                target: &ScreenType,
                params: &TypedParams,
                origin: &str,
            ) -> Option<NavigationRequest> {
                assert_eq!(params["id"].value(), &Value::Int(42));
                Some(NavigationRequest::new(
                    NavigationTarget::Screen(target.clone()),
                    params.clone(),
                    origin,
                ))
            }

            fn start_screen(&self, _host: &dyn Host, _request: NavigationRequest) {}
        }

        let table = RouteTable::build(vec![destination("S", "open", &["id"])]).unwrap();
        let factories = FactoryRegistry::new();
        factories.set_default_screen(Arc::new(AssertingFactory));
        let handler = SchemeHandler::new(
            HandlerConfig {
                prefix: "myapp://".into(),
                ..Default::default()
            },
            table,
            factories,
            Arc::new(StaticProvider(Some(Arc::new(StaticHost)))),
        );
        assert!(handler.handle("myapp://open?id=42"));
    }
}
