//! Scheme-URL routing and dispatch engine.
//!
//! Given a string of the form `prefix + action + "?" + params`, resolves
//! which registered destination should handle it, coerces the string
//! params into typed values and invokes a pluggable factory to perform
//! the navigation. The actual navigation effect is delegated to an
//! external screen host supplied by the embedder.

pub mod config;
pub mod dispatch;
pub mod handler;
pub mod host;
pub mod observability;
pub mod routing;
pub mod scheme;
pub mod typing;

pub use config::schema::{DestinationConfig, HandlerConfig, RouteRegistration, VariantConfig};
pub use config::validation::ValidationError;
pub use dispatch::factory::{
    FactoryKey, FactoryRegistry, NavigationRequest, NavigationTarget, ScreenFactory,
    SubScreenFactory,
};
pub use handler::{Interceptor, SchemeHandler};
pub use host::{CommitId, Host, HostProvider, HostSpec, ScreenType, SubScreen, SubScreenType};
pub use routing::{RouteEntry, RouteMatcher, RouteTable};
pub use scheme::{parse, reserved, ParseError, RawParams, RawScheme};
pub use typing::{TypedParams, TypedValue, Value, ValueConverter, ValueKind};
