//! Pre-interceptor chain contract.
//!
//! # Responsibilities
//! - Let the embedder observe or consume a scheme before route
//!   resolution runs
//!
//! # Design Decisions
//! - A flat ordered chain, no nesting: the first interceptor returning
//!   true ends processing with handled = true
//! - The same contract serves as the fallback hook, consulted only when
//!   nothing else handled the scheme

use crate::handler::SchemeHandler;
use crate::host::Host;
use crate::scheme::RawScheme;

/// A hook consulted before (or, as fallback, after) route resolution.
///
/// Interceptors may perform their own navigation or purely observe and
/// decline by returning false.
pub trait Interceptor: Send + Sync {
    fn intercept(
        &self,
        handler: &SchemeHandler,
        host: &dyn Host,
        scheme: &RawScheme,
        raw: &str,
    ) -> bool;
}
