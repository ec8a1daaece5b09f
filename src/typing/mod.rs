//! Parameter typing subsystem.
//!
//! # Data Flow
//! ```text
//! RawScheme params (string → string)
//!     → value.rs (TypedValue, coercion rules)
//!     → coerce.rs (per-route typing: converter hook, reserved keys,
//!       declared key sets, drop-on-failure)
//!     → TypedParams (string → TypedValue)
//! ```
//!
//! # Design Decisions
//! - A single failing key is dropped with a warning; it never aborts the
//!   typing of sibling keys
//! - Boolean coercion is total: false iff empty, "0" or "false"
//!   (case-insensitive), true otherwise
//! - The reserved navigation flags are always boolean, whatever the
//!   route declares

pub mod coerce;
pub mod value;

pub use coerce::{type_params, ValueConverter};
pub use value::{parse_bool, TypedParams, TypedValue, Value, ValueKind};
