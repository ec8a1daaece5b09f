//! Scheme string subsystem.
//!
//! # Data Flow
//! ```text
//! raw string "<prefix><action>?<k1>=<v1>&<k2>=<v2>"
//!     → parser.rs (prefix check, action/query split, segment scan)
//!     → RawScheme { action, params }
//!
//! RawScheme
//!     → to_scheme_string (keys sorted, wire format reproduced exactly)
//! ```
//!
//! # Design Decisions
//! - The parser never percent-decodes; decoding belongs to an upstream
//!   interceptor supplied by the embedder
//! - A prefix mismatch is a skip signal, not an error condition
//! - Duplicate query keys resolve last-write-wins

pub mod parser;

pub use parser::{parse, ParseError, RawParams, RawScheme};

/// Reserved parameter keys with fixed engine-level meaning.
pub mod reserved {
    /// Forces sub-screen dispatch to launch a new host even when the
    /// current one is reusable. Always boolean-typed.
    pub const FORCE_NEW_HOST: &str = "force_new_host";

    /// Requests the current screen be finished before navigating; for
    /// sub-screen display it selects replace-and-destroy over stacking.
    /// Always boolean-typed.
    pub const FINISH_CURRENT: &str = "finish_current";

    /// Injected into every navigation request: marks the destination as
    /// scheme-originated.
    pub const FROM_SCHEME: &str = "from_scheme";

    /// Injected into every navigation request: the original raw scheme
    /// string.
    pub const ORIGIN_SCHEME: &str = "origin_scheme";
}
