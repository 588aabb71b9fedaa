// Error types for conformance evaluation

use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur during conformance evaluation
///
/// Missing bindings and missing entities are not errors; they resolve to
/// `false` or `Null`. Only values of the wrong kind fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// Two values that cannot be ordered or equated
    #[error("Type error: cannot compare {left} with {right}")]
    IncompatibleComparison {
        /// Kind of the left operand
        left: String,
        /// Kind of the right operand
        right: String,
    },

    /// Operator not defined for a value kind
    #[error("Operator '{operator}' is not supported for {value_type} values")]
    UnsupportedOperator {
        /// The operator
        operator: String,
        /// Kind of the operands
        value_type: String,
    },

    /// Arithmetic over operands of different or non-numeric kinds
    #[error("Type error: cannot apply '{operator}' to {left} and {right}")]
    MathTypeMismatch {
        /// The operator
        operator: String,
        /// Kind of the left operand
        left: String,
        /// Kind of the right operand
        right: String,
    },

    /// Arithmetic result out of range
    #[error("Arithmetic overflow: {left} {operator} {right}")]
    Overflow {
        /// The operator
        operator: String,
        /// Left operand
        left: String,
        /// Right operand
        right: String,
    },

    /// Division with a zero divisor
    #[error("Division by zero")]
    DivisionByZero,

    /// A bound value of the wrong kind
    #[error("Type error: {name} is bound to {actual}, expected {expected}")]
    UnexpectedValueType {
        /// Binding name
        name: String,
        /// Expected kind
        expected: String,
        /// Kind found
        actual: String,
    },
}

impl EvaluationError {
    /// Check if this error reports a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleComparison { .. }
                | Self::MathTypeMismatch { .. }
                | Self::UnexpectedValueType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EvaluationError::UnexpectedValueType {
            name: "LT".into(),
            expected: "boolean".into(),
            actual: "integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "Type error: LT is bound to integer, expected boolean"
        );
        assert!(err.is_type_error());
        assert!(!EvaluationError::DivisionByZero.is_type_error());
    }
}
