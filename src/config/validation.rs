//! Registration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject contract violations at table-build time rather than at
//!   dispatch time
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: `&[DestinationConfig]` →
//!   `Result<(), Vec<ValidationError>>`
//! - Runs before any entry is constructed

use thiserror::Error;
use tracing::warn;

use crate::config::schema::{DestinationConfig, VariantConfig};
use crate::scheme::reserved;

/// Semantic violations in registration data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A destination with no action registrations can never be reached.
    #[error("destination `{destination}` registers no actions")]
    NoRegistrations { destination: String },

    /// An empty action name cannot appear in a scheme (the parser rejects
    /// empty actions).
    #[error("destination `{destination}` registers an empty action name")]
    EmptyAction { destination: String },

    /// A sub-screen route must declare at least one compatible host.
    #[error("sub-screen destination `{destination}` declares no allowed host types")]
    NoAllowedHosts { destination: String },

    /// A sub-screen target type must be named.
    #[error("sub-screen destination `{destination}` has an empty target type")]
    EmptySubScreenTarget { destination: String },

    /// A screen target type must be named.
    #[error("screen destination `{destination}` has an empty target type")]
    EmptyScreenTarget { destination: String },
}

/// Check registration data for semantic violations.
pub fn validate(destinations: &[DestinationConfig]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for destination in destinations {
        let name = destination.name.clone();

        if destination.routes.is_empty() {
            errors.push(ValidationError::NoRegistrations {
                destination: name.clone(),
            });
        }
        for registration in &destination.routes {
            if registration.action.is_empty() {
                errors.push(ValidationError::EmptyAction {
                    destination: name.clone(),
                });
            }
        }

        match &destination.variant {
            VariantConfig::Screen { target, .. } => {
                if target.name().is_empty() {
                    errors.push(ValidationError::EmptyScreenTarget {
                        destination: name.clone(),
                    });
                }
            }
            VariantConfig::SubScreen {
                target,
                allowed_hosts,
                ..
            } => {
                if allowed_hosts.is_empty() {
                    errors.push(ValidationError::NoAllowedHosts {
                        destination: name.clone(),
                    });
                }
                if target.name().is_empty() {
                    errors.push(ValidationError::EmptySubScreenTarget {
                        destination: name.clone(),
                    });
                }
            }
        }

        // The reserved flags are always typed boolean; a declaration in
        // another typed set is ignored at coercion time.
        for key in [reserved::FORCE_NEW_HOST, reserved::FINISH_CURRENT] {
            let redeclared = destination.int_keys.iter().any(|k| k == key)
                || destination.long_keys.iter().any(|k| k == key)
                || destination.float_keys.iter().any(|k| k == key)
                || destination.double_keys.iter().any(|k| k == key);
            if redeclared {
                warn!(
                    destination = %name,
                    key,
                    "reserved key declared in a non-boolean typed set; declaration ignored"
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
