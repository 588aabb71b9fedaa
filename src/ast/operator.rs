//! Operator definitions for conformance expressions

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Logical operators joining boolean expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// Logical AND (`&`)
    #[serde(rename = "&")]
    And,
    /// Logical OR (`|`)
    #[serde(rename = "|")]
    Or,
    /// Logical XOR (`^`), folded pairwise
    #[serde(rename = "^")]
    Xor,
}

impl LogicalOperator {
    /// Source symbol of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
        }
    }

    /// English word used in descriptions
    pub fn word(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
        }
    }

    /// Combine an accumulated result with the next operand
    #[inline]
    pub fn apply(&self, acc: bool, operand: bool) -> bool {
        match self {
            Self::And => acc && operand,
            Self::Or => acc || operand,
            Self::Xor => (acc || operand) && !(acc && operand),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators between values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Equal (`==`)
    #[serde(rename = "==")]
    Equal,
    /// Not equal (`!=`)
    #[serde(rename = "!=")]
    NotEqual,
    /// Less than (`<`)
    #[serde(rename = "<")]
    LessThan,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LessThanOrEqual,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    GreaterThan,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
}

impl ComparisonOperator {
    /// Source symbol of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    /// English phrase used in descriptions
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Equal => "is equal to",
            Self::NotEqual => "is not equal to",
            Self::LessThan => "is less than",
            Self::LessThanOrEqual => "is less than or equal to",
            Self::GreaterThan => "is greater than",
            Self::GreaterThanOrEqual => "is greater than or equal to",
        }
    }

    /// Check if this is `==` or `!=`
    pub fn is_equality(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// Check if this is `<` or `<=`
    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::LessThan | Self::LessThanOrEqual)
    }

    /// Check if this is `>` or `>=`
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::GreaterThan | Self::GreaterThanOrEqual)
    }

    /// Check if the operator excludes equal operands
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::LessThan | Self::GreaterThan | Self::NotEqual)
    }

    /// The operator producing the opposite result
    pub fn negate(&self) -> Self {
        match self {
            Self::Equal => Self::NotEqual,
            Self::NotEqual => Self::Equal,
            Self::LessThan => Self::GreaterThanOrEqual,
            Self::LessThanOrEqual => Self::GreaterThan,
            Self::GreaterThan => Self::LessThanOrEqual,
            Self::GreaterThanOrEqual => Self::LessThan,
        }
    }

    /// Test an ordering against this operator
    #[inline]
    pub fn matches(&self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => ordering == Ordering::Equal,
            Self::NotEqual => ordering != Ordering::Equal,
            Self::LessThan => ordering == Ordering::Less,
            Self::LessThanOrEqual => ordering != Ordering::Greater,
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic operators between comparison values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathOperator {
    /// Addition (`+`)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (`*`)
    #[serde(rename = "*")]
    Multiply,
    /// Division (`/`)
    #[serde(rename = "/")]
    Divide,
}

impl MathOperator {
    /// Source symbol of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for MathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_is_parity() {
        let op = LogicalOperator::Xor;
        let fold = |values: &[bool]| values[1..].iter().fold(values[0], |acc, v| op.apply(acc, *v));
        assert!(fold(&[true, false, false]));
        assert!(!fold(&[true, true, false]));
        assert!(fold(&[true, true, true]));
        assert!(!fold(&[false, false, false]));
    }

    #[test]
    fn test_comparison_negate_round_trip() {
        for op in [
            ComparisonOperator::Equal,
            ComparisonOperator::NotEqual,
            ComparisonOperator::LessThan,
            ComparisonOperator::LessThanOrEqual,
            ComparisonOperator::GreaterThan,
            ComparisonOperator::GreaterThanOrEqual,
        ] {
            assert_eq!(op.negate().negate(), op);
            for ordering in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
                assert_ne!(op.matches(ordering), op.negate().matches(ordering));
            }
        }
    }

    #[test]
    fn test_directions() {
        assert!(ComparisonOperator::LessThan.is_ascending());
        assert!(ComparisonOperator::GreaterThanOrEqual.is_descending());
        assert!(!ComparisonOperator::Equal.is_ascending());
        assert!(ComparisonOperator::GreaterThan.is_strict());
        assert!(!ComparisonOperator::LessThanOrEqual.is_strict());
    }
}
