//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route table build (at startup):
//!     DestinationConfig[]
//!     → validation (semantic checks, all errors reported)
//!     → one RouteEntry per (destination, action registration)
//!     → group by action, stable sort descending by required-condition
//!       count
//!     → freeze as immutable RouteTable
//!
//! Lookup (per handle() call):
//!     action + raw params
//!     → table.rs (entries_for)
//!     → matcher.rs (first entry whose conditions hold)
//!     → Some(&RouteEntry) | None
//! ```
//!
//! # Design Decisions
//! - Table is immutable after build; concurrent reads need no locking
//! - First match wins over a linear scan; correctness rests entirely on
//!   the priority ordering established at build time
//! - A custom matcher on an entry replaces default matching outright

pub mod entry;
pub mod matcher;
pub mod table;

pub use entry::{
    DestinationSpec, RequiredConditions, RouteEntry, ScreenRoute, SubScreenRoute, Variant,
};
pub use matcher::{resolve, RouteMatcher};
pub use table::RouteTable;
