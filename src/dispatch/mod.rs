//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! resolved RouteEntry + typed params + current host
//!     → factory.rs (resolve the entry's factory through the registry,
//!       lazily constructed and cached per key)
//!     → screen.rs | subscreen.rs (variant dispatch)
//!     → external screen host (navigate / refresh / display)
//!     → handled: bool
//! ```
//!
//! # Design Decisions
//! - Factory instances are explicit registry entries, not reflective
//!   constructions; one cached instance per key, shared across entries
//! - Every dispatch failure is caught, logged and downgraded to
//!   `handled = false`; nothing propagates past `handle()`

pub mod factory;
pub mod screen;
pub mod subscreen;

pub use factory::{
    FactoryError, FactoryKey, FactoryRegistry, NavigationRequest, NavigationTarget,
    ScreenFactory, SubScreenFactory,
};
pub use subscreen::select_host;
