//! Screen-level dispatch.
//!
//! # Responsibilities
//! - Resolve the route's screen factory
//! - Honor jump suppression, refresh-if-current and the finish-current
//!   flag
//! - Hand the built navigation request to the factory's entry point
//!
//! # Design Decisions
//! - Factory resolution failure is logged and reported as not handled
//! - Jump suppression reports handled without navigating; the factory
//!   made an explicit decision

use tracing::{debug, warn};

use crate::dispatch::factory::FactoryRegistry;
use crate::host::Host;
use crate::routing::entry::{DestinationSpec, ScreenRoute};
use crate::scheme::reserved;
use crate::typing::{TypedParams, TypedValue};

pub(crate) fn bool_param(params: &TypedParams, key: &str) -> bool {
    params
        .get(key)
        .and_then(TypedValue::as_bool)
        .unwrap_or(false)
}

/// Dispatch a screen route. Returns whether the scheme was handled.
pub fn dispatch(
    route: &ScreenRoute,
    spec: &DestinationSpec,
    host: &dyn Host,
    params: &TypedParams,
    origin: &str,
    factories: &FactoryRegistry,
) -> bool {
    let factory = match factories.screen_factory(route.factory.as_ref()) {
        Ok(factory) => factory,
        Err(error) => {
            warn!(destination = %spec.name, %error, "screen factory unavailable");
            return false;
        }
    };

    if factory.should_block_jump(host, &route.target, params) {
        debug!(destination = %spec.name, target = %route.target, "jump suppressed by factory");
        return true;
    }

    let Some(request) = factory.build_request(host, &route.target, params, origin) else {
        debug!(destination = %spec.name, target = %route.target, "factory built no request");
        return false;
    };

    if spec.refresh_if_current && host.host_type() == route.target {
        debug!(target = %route.target, "target already current, refreshing in place");
        host.refresh_in_place(&request);
        return true;
    }

    if bool_param(params, reserved::FINISH_CURRENT) {
        host.finish();
    }
    factory.start_screen(host, request);
    true
}
