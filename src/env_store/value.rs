use std::{fmt, str::FromStr};

/// A stored environment value carrying both its current type and payload.
///
/// Values always enter the store as [`EnvValue::Str`], exactly as parsed
/// from the backing file. A successful typed read replaces the entry with
/// the coerced scalar so later reads skip the reparse; a reload resets
/// the entry to `Str` until it is coerced again.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    /// Raw trimmed text as parsed from the file.
    Str(String),
    /// Signed integer produced by coercion of a `Str`.
    Int(i64),
    /// Boolean produced by coercion of a `Str`.
    Bool(bool),
    /// Double-precision float produced by coercion of a `Str`.
    Float(f64),
}

/// Target type for typed lookups and write-path parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Raw string, no parsing.
    String,
    /// Signed 64-bit integer.
    Int,
    /// Boolean literal.
    Bool,
    /// Double-precision float.
    Float,
}

/// Error returned when parsing a [`ValueType`] from an unrecognised name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported value type: {0}")]
pub struct UnsupportedValueType(pub String);

impl EnvValue {
    /// Parses a raw string as the requested type.
    ///
    /// `ValueType::String` never fails and keeps the string verbatim.
    /// The remaining types apply the same rules as read-path coercion:
    /// decimal `i64` for `int` (overflow fails), the fixed boolean
    /// vocabulary for `bool`, and `f64` syntax (exponents included) for
    /// `float`. Returns `None` when the string does not parse.
    pub fn parse_as(raw: &str, value_type: ValueType) -> Option<Self> {
        match value_type {
            ValueType::String => Some(Self::Str(raw.to_owned())),
            ValueType::Int => raw.parse::<i64>().ok().map(Self::Int),
            ValueType::Bool => parse_bool_literal(raw).map(Self::Bool),
            ValueType::Float => raw.parse::<f64>().ok().map(Self::Float),
        }
    }

    /// Applies the coercion table for a typed lookup.
    ///
    /// A `Str` source parses toward any target. A scalar source only
    /// matches its own type; there is no formatting back to string and
    /// no cross-scalar conversion. Returns `None` on mismatch.
    pub fn coerce(&self, target: ValueType) -> Option<Self> {
        match self {
            Self::Str(raw) => Self::parse_as(raw, target),
            Self::Int(_) if target == ValueType::Int => Some(self.clone()),
            Self::Bool(_) if target == ValueType::Bool => Some(self.clone()),
            Self::Float(_) if target == ValueType::Float => Some(self.clone()),
            _ => None,
        }
    }

    /// The tag this value currently carries.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Str(_) => ValueType::String,
            Self::Int(_) => ValueType::Int,
            Self::Bool(_) => ValueType::Bool,
            Self::Float(_) => ValueType::Float,
        }
    }

    /// Returns the payload if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(raw) => Some(raw),
            _ => None,
        }
    }

    /// Returns the payload if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the payload if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the payload if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Float => "float",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ValueType {
    type Err = UnsupportedValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "int" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            "float" => Ok(Self::Float),
            other => Err(UnsupportedValueType(other.to_owned())),
        }
    }
}

/// Parses the fixed boolean vocabulary.
///
/// Exactly `1 t T TRUE true True` are true and `0 f F FALSE false False`
/// are false; anything else is a coercion failure.
fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
