//! Runtime values bound in an evaluation context

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete value produced when a comparison operand is resolved, and the
/// value type a [`Context`](crate::evaluator::Context) binds names to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Value {
    /// Explicit absence of a value
    Null,

    /// Boolean value, typically "this feature or attribute is present"
    Boolean(bool),

    /// Signed integer value
    Integer(i64),

    /// Unsigned integer value (hex literals)
    Unsigned(u64),

    /// Decimal value with arbitrary precision
    Decimal(Decimal),

    /// Named interaction model status code
    StatusCode(String),
}

impl Value {
    /// Name of the value kind, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Unsigned(_) => "unsigned",
            Self::Decimal(_) => "decimal",
            Self::StatusCode(_) => "status code",
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is one of the numeric kinds
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Unsigned(_) | Self::Decimal(_))
    }

    /// Get the boolean payload, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a non-negative whole number, if it is one
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Self::Integer(i) => u64::try_from(*i).ok(),
            Self::Unsigned(u) => Some(*u),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Unsigned(u) => write!(f, "0x{u:X}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::StatusCode(code) => write!(f, "Status.{code}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}
