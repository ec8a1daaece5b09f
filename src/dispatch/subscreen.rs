//! Sub-screen dispatch.
//!
//! # Responsibilities
//! - Decide whether the current host can be reused for the sub-screen
//! - Honor the force-new-host flag and its per-route key override
//! - Launch a new compatible host, or refresh / display inside the
//!   current one
//!
//! # Design Decisions
//! - Gating comparisons between launch arguments and new params are
//!   type-aware; raw strings are not consulted
//! - Allowed host types are tried strictly in declaration order, both
//!   for reuse and for new-host selection
//! - A display call returning the invalid commit sentinel means not
//!   handled

use tracing::{debug, warn};

use crate::dispatch::factory::{FactoryRegistry, NavigationRequest, NavigationTarget};
use crate::dispatch::screen::bool_param;
use crate::host::{Host, HostSpec};
use crate::routing::entry::{DestinationSpec, SubScreenRoute};
use crate::scheme::reserved;
use crate::typing::TypedParams;

/// Pick the first allowed host whose required gating keys are all
/// present in `params`. Shared with embedder factories building launch
/// requests.
pub fn select_host<'a>(allowed_hosts: &'a [HostSpec], params: &TypedParams) -> Option<&'a HostSpec> {
    allowed_hosts
        .iter()
        .find(|spec| spec.required_params.iter().all(|key| params.contains_key(key)))
}

fn gating_satisfied(spec: &HostSpec, host: &dyn Host, params: &TypedParams) -> bool {
    spec.required_params.iter().all(|key| {
        match (params.get(key), host.launch_argument(key)) {
            (Some(new), Some(current)) => current.same_value(new),
            _ => false,
        }
    })
}

/// True iff the current host is a valid target for the sub-screen:
/// its type is one of the allowed host types, its navigation state is
/// not finalized, and every declared gating param matches.
fn can_reuse_current_host(
    route: &SubScreenRoute,
    host: &dyn Host,
    params: &TypedParams,
) -> bool {
    if host.is_navigation_state_finalized() {
        return false;
    }
    let current = host.host_type();
    route
        .allowed_hosts
        .iter()
        .any(|spec| spec.host_type == current && gating_satisfied(spec, host, params))
}

/// Dispatch a sub-screen route. Returns whether the scheme was handled.
pub fn dispatch(
    route: &SubScreenRoute,
    spec: &DestinationSpec,
    host: &dyn Host,
    params: &TypedParams,
    origin: &str,
    factories: &FactoryRegistry,
) -> bool {
    if route.allowed_hosts.is_empty() {
        // Rejected at table-build time; reaching here means the entry
        // bypassed validation.
        warn!(destination = %spec.name, "sub-screen route has no allowed hosts");
        return false;
    }

    let factory = match factories.sub_screen_factory(route.factory.as_ref()) {
        Ok(factory) => factory,
        Err(error) => {
            warn!(destination = %spec.name, %error, "sub-screen factory unavailable");
            return false;
        }
    };

    let force_key = route
        .force_new_host_key
        .as_deref()
        .unwrap_or(reserved::FORCE_NEW_HOST);
    let force_new_host = route.force_new_host || bool_param(params, force_key);
    let finish_current = bool_param(params, reserved::FINISH_CURRENT);

    if force_new_host || !can_reuse_current_host(route, host, params) {
        let Some(request) =
            factory.build_host_request(host, &route.allowed_hosts, &route.target, params, origin)
        else {
            debug!(destination = %spec.name, "no allowed host accepts these params");
            return false;
        };
        if finish_current {
            host.finish();
        }
        factory.start_host(host, request);
        return true;
    }

    // Reuse the current host.
    if spec.refresh_if_current && host.active_sub_screen_type().as_ref() == Some(&route.target) {
        let request = NavigationRequest::new(
            NavigationTarget::HostWithSubScreen {
                host: host.host_type(),
                sub_screen: route.target.clone(),
            },
            params.clone(),
            origin,
        );
        debug!(target = %route.target, "sub-screen already active, refreshing in place");
        host.refresh_in_place(&request);
        return true;
    }

    let Some(sub_screen) = factory.build_sub_screen(&route.target, params) else {
        debug!(destination = %spec.name, target = %route.target, "factory built no sub-screen");
        return false;
    };
    let commit = if finish_current {
        host.display_replacing_current(sub_screen)
    } else {
        host.display_stacked(sub_screen)
    };
    if !commit.is_valid() {
        warn!(destination = %spec.name, target = %route.target, "host rejected the display call");
        return false;
    }
    true
}
