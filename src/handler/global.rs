//! Process-wide default handler.
//!
//! # Responsibilities
//! - Hold one handler instance shared across the process
//! - Route `handle()` calls from code without a handler reference
//!
//! # Design Decisions
//! - Installed once at startup, after the route table is built; lookups
//!   from any thread observe either nothing or the fully built handler
//! - Uninstall drops the slot at teardown; a missing handler reports
//!   schemes as not handled

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::warn;

use crate::handler::SchemeHandler;

static DEFAULT: ArcSwapOption<SchemeHandler> = ArcSwapOption::const_empty();

/// Install `handler` as the process-wide default.
pub fn install(handler: Arc<SchemeHandler>) {
    if DEFAULT.swap(Some(handler)).is_some() {
        warn!("replacing an already installed default scheme handler");
    }
}

/// The installed default handler, if any.
pub fn installed() -> Option<Arc<SchemeHandler>> {
    DEFAULT.load_full()
}

/// Drop the installed default handler.
pub fn uninstall() {
    DEFAULT.store(None);
}

/// Handle `raw` with the installed default handler. Returns false when
/// none is installed.
pub fn handle(raw: &str) -> bool {
    match installed() {
        Some(handler) => handler.handle(raw),
        None => false,
    }
}
