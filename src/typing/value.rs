//! Typed parameter values.

use std::collections::HashMap;
use std::fmt;

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Bool(bool),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

/// Tag identifying the variant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Bool,
    Long,
    Float,
    Double,
    Str,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Str => "string",
        };
        f.write_str(name)
    }
}

/// A coerced parameter: the original raw string plus its typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    raw: String,
    value: Value,
}

/// Typed parameter map produced for one dispatch.
pub type TypedParams = HashMap<String, TypedValue>;

impl TypedValue {
    pub fn new(raw: impl Into<String>, value: Value) -> Self {
        Self {
            raw: raw.into(),
            value,
        }
    }

    pub fn int(v: i32) -> Self {
        Self::new(v.to_string(), Value::Int(v))
    }

    pub fn bool(v: bool) -> Self {
        Self::new(if v { "true" } else { "false" }, Value::Bool(v))
    }

    pub fn long(v: i64) -> Self {
        Self::new(v.to_string(), Value::Long(v))
    }

    pub fn float(v: f32) -> Self {
        Self::new(v.to_string(), Value::Float(v))
    }

    pub fn double(v: f64) -> Self {
        Self::new(v.to_string(), Value::Double(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        let raw = v.into();
        Self {
            value: Value::Str(raw.clone()),
            raw,
        }
    }

    /// The raw string the value was coerced from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> ValueKind {
        match self.value {
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Str(_) => ValueKind::Str,
        }
    }

    /// The boolean value, if this is boolean-typed.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Type-aware equality: values of different kinds are never equal and
    /// the raw strings are not consulted.
    pub fn same_value(&self, other: &TypedValue) -> bool {
        self.value == other.value
    }
}

/// Boolean coercion rule for scheme parameters.
///
/// The result is `false` iff the value is empty, `"0"`, or
/// case-insensitively `"false"`; everything else is `true`.
pub fn parse_bool(raw: &str) -> bool {
    !(raw.is_empty() || raw == "0" || raw.eq_ignore_ascii_case("false"))
}
