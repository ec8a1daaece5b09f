//! Per-route parameter coercion.
//!
//! # Responsibilities
//! - Run the entry's custom value converter, when set, before typing
//! - Force the reserved navigation flags to boolean
//! - Type each remaining key according to the entry's declared key sets
//!
//! # Design Decisions
//! - Declared set precedence is int, bool, long, float, double; an
//!   undeclared key stays a string
//! - A key that fails numeric parsing is dropped with a warning and
//!   typing continues with the siblings

use std::borrow::Cow;

use thiserror::Error;
use tracing::warn;

use crate::routing::entry::{DestinationSpec, RouteEntry};
use crate::scheme::{reserved, RawParams};
use crate::typing::value::{parse_bool, TypedParams, TypedValue, Value};

/// Pluggable raw-value rewrite applied before typing.
///
/// The converter may inspect sibling params but must have no side
/// effects beyond the returned string.
pub trait ValueConverter: Send + Sync + std::fmt::Debug {
    fn convert(&self, key: &str, raw_value: &str, all_params: &RawParams) -> String;
}

#[derive(Debug, Error)]
enum CoerceError {
    #[error("invalid integer: {0}")]
    Int(#[from] std::num::ParseIntError),

    #[error("invalid float: {0}")]
    Float(#[from] std::num::ParseFloatError),
}

/// Coerce every raw param of one scheme according to `entry`.
pub fn type_params(raw_params: &RawParams, entry: &RouteEntry) -> TypedParams {
    let spec = &entry.spec;
    let mut out = TypedParams::with_capacity(raw_params.len());

    for (key, raw_value) in raw_params {
        let value: Cow<'_, str> = match &spec.converter {
            Some(converter) => Cow::Owned(converter.convert(key, raw_value, raw_params)),
            None => Cow::Borrowed(raw_value.as_str()),
        };
        match coerce_one(key, &value, spec) {
            Ok(typed) => {
                out.insert(key.clone(), typed);
            }
            Err(error) => {
                warn!(
                    destination = %spec.name,
                    key = %key,
                    value = %value,
                    %error,
                    "dropping parameter that failed coercion"
                );
            }
        }
    }
    out
}

fn coerce_one(key: &str, raw: &str, spec: &DestinationSpec) -> Result<TypedValue, CoerceError> {
    // The reserved navigation flags are boolean whatever the route
    // declares.
    if key == reserved::FORCE_NEW_HOST || key == reserved::FINISH_CURRENT {
        return Ok(TypedValue::new(raw, Value::Bool(parse_bool(raw))));
    }

    let value = if spec.int_keys.contains(key) {
        Value::Int(raw.parse::<i32>()?)
    } else if spec.bool_keys.contains(key) {
        Value::Bool(parse_bool(raw))
    } else if spec.long_keys.contains(key) {
        Value::Long(raw.parse::<i64>()?)
    } else if spec.float_keys.contains(key) {
        Value::Float(raw.parse::<f32>()?)
    } else if spec.double_keys.contains(key) {
        Value::Double(raw.parse::<f64>()?)
    } else {
        Value::Str(raw.to_string())
    };
    Ok(TypedValue::new(raw, value))
}
