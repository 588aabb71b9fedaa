//! Comparison operand definitions

use super::operator::MathOperator;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operand of a comparison expression
///
/// Literal variants keep the source text they were parsed from so that the
/// canonical rendering reproduces it (`0x0A` stays `0x0A`, `1.50` stays `1.50`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComparisonValue {
    /// Boolean literal
    Boolean {
        /// Parsed value
        value: bool,
        /// Source text
        raw: String,
    },

    /// Signed integer literal
    Int {
        /// Parsed value
        value: i64,
        /// Source text
        raw: String,
    },

    /// Hexadecimal literal
    Hex {
        /// Parsed value
        value: u64,
        /// Source text
        raw: String,
    },

    /// Decimal literal
    Float {
        /// Parsed value
        value: Decimal,
        /// Source text
        raw: String,
    },

    /// `null`
    Null,

    /// Status code name (`Status.Busy`)
    StatusCode {
        /// Status code name without the `Status.` prefix
        code: String,
    },

    /// Named value bound in the evaluation context
    Identifier {
        /// Context value name
        id: String,
    },

    /// Arithmetic over two operands (boxed for size optimization)
    Math(Box<MathOperation>),
}

/// Arithmetic operation data (separate struct to optimize enum size)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MathOperation {
    /// The operator
    pub operator: MathOperator,
    /// Left operand
    pub left: ComparisonValue,
    /// Right operand
    pub right: ComparisonValue,
}

impl ComparisonValue {
    /// Create a boolean literal
    pub fn boolean(value: bool) -> Self {
        Self::Boolean {
            value,
            raw: value.to_string(),
        }
    }

    /// Create an integer literal
    pub fn int(value: i64) -> Self {
        Self::Int {
            value,
            raw: value.to_string(),
        }
    }

    /// Create a hex literal
    pub fn hex(value: u64) -> Self {
        Self::Hex {
            value,
            raw: format!("0x{value:X}"),
        }
    }

    /// Create a decimal literal
    pub fn float(value: Decimal) -> Self {
        Self::Float {
            value,
            raw: value.to_string(),
        }
    }

    /// Create a status code
    pub fn status_code(code: impl Into<String>) -> Self {
        Self::StatusCode { code: code.into() }
    }

    /// Create a context value reference
    pub fn identifier(id: impl Into<String>) -> Self {
        Self::Identifier { id: id.into() }
    }

    /// Create an arithmetic operation
    pub fn math(operator: MathOperator, left: ComparisonValue, right: ComparisonValue) -> Self {
        Self::Math(Box::new(MathOperation {
            operator,
            left,
            right,
        }))
    }

    /// Discriminator used for JSON encoding and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boolean { .. } => "boolean",
            Self::Int { .. } => "int",
            Self::Hex { .. } => "hex",
            Self::Float { .. } => "float",
            Self::Null => "null",
            Self::StatusCode { .. } => "statusCode",
            Self::Identifier { .. } => "identifier",
            Self::Math(_) => "math",
        }
    }
}

impl fmt::Display for ComparisonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean { raw, .. }
            | Self::Int { raw, .. }
            | Self::Hex { raw, .. }
            | Self::Float { raw, .. } => f.write_str(raw),
            Self::Null => f.write_str("null"),
            Self::StatusCode { code } => write!(f, "Status.{code}"),
            Self::Identifier { id } => f.write_str(id),
            Self::Math(op) => write!(f, "({} {} {})", op.left, op.operator, op.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_raw_text() {
        let hex = ComparisonValue::Hex {
            value: 10,
            raw: "0x0a".into(),
        };
        assert_eq!(hex.to_string(), "0x0a");
        assert_eq!(ComparisonValue::hex(255).to_string(), "0xFF");
        assert_eq!(ComparisonValue::Null.to_string(), "null");
        assert_eq!(ComparisonValue::status_code("Busy").to_string(), "Status.Busy");
    }

    #[test]
    fn test_math_display_is_parenthesized() {
        let value = ComparisonValue::math(
            MathOperator::Multiply,
            ComparisonValue::math(
                MathOperator::Add,
                ComparisonValue::identifier("MinLevel"),
                ComparisonValue::int(1),
            ),
            ComparisonValue::int(2),
        );
        assert_eq!(value.to_string(), "((MinLevel + 1) * 2)");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = ComparisonValue::float(Decimal::new(125, 2));
        let mut copy = original.clone();
        if let ComparisonValue::Float { value, .. } = &mut copy {
            *value += Decimal::ONE;
        }
        assert_eq!(original, ComparisonValue::float(Decimal::new(125, 2)));
        assert_ne!(original, copy);
    }
}
