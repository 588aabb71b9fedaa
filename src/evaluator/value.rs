//! Comparison operand resolution, arithmetic and value comparison

use super::context::Context;
use super::error::{EvaluationError, EvaluationResult};
use crate::ast::{ComparisonOperator, ComparisonValue, MathOperation, MathOperator};
use crate::model::Value;
use rust_decimal::Decimal;
use std::cmp::Ordering;

impl ComparisonValue {
    /// Resolve the operand to a concrete value.
    ///
    /// Literals are constant. A context value that is not bound resolves to
    /// [`Value::Null`].
    pub fn value(&self, ctx: &Context<'_>) -> EvaluationResult<Value> {
        match self {
            Self::Boolean { value, .. } => Ok(Value::Boolean(*value)),
            Self::Int { value, .. } => Ok(Value::Integer(*value)),
            Self::Hex { value, .. } => Ok(Value::Unsigned(*value)),
            Self::Float { value, .. } => Ok(Value::Decimal(*value)),
            Self::Null => Ok(Value::Null),
            Self::StatusCode { code } => Ok(Value::StatusCode(code.clone())),
            Self::Identifier { id } => Ok(ctx.value(id).cloned().unwrap_or(Value::Null)),
            Self::Math(operation) => operation.eval(ctx),
        }
    }

    /// Compare this operand with `other` under `operator`
    pub fn compare(
        &self,
        ctx: &Context<'_>,
        other: &ComparisonValue,
        operator: ComparisonOperator,
    ) -> EvaluationResult<bool> {
        let left = self.value(ctx)?;
        let right = other.value(ctx)?;
        compare_values(&left, &right, operator)
    }
}

impl MathOperation {
    /// Evaluate both operands and apply the operator
    pub fn eval(&self, ctx: &Context<'_>) -> EvaluationResult<Value> {
        let left = self.left.value(ctx)?;
        let right = self.right.value(ctx)?;
        apply_math(self.operator, &left, &right)
    }
}

/// Apply an arithmetic operator.
///
/// Defined for integer with integer and decimal with decimal only.
pub fn apply_math(operator: MathOperator, left: &Value, right: &Value) -> EvaluationResult<Value> {
    let overflow = || EvaluationError::Overflow {
        operator: operator.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    };

    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            let result = match operator {
                MathOperator::Add => a.checked_add(*b),
                MathOperator::Subtract => a.checked_sub(*b),
                MathOperator::Multiply => a.checked_mul(*b),
                MathOperator::Divide => {
                    if *b == 0 {
                        return Err(EvaluationError::DivisionByZero);
                    }
                    a.checked_div(*b)
                }
            };
            result.map(Value::Integer).ok_or_else(overflow)
        }
        (Value::Decimal(a), Value::Decimal(b)) => {
            let result = match operator {
                MathOperator::Add => a.checked_add(*b),
                MathOperator::Subtract => a.checked_sub(*b),
                MathOperator::Multiply => a.checked_mul(*b),
                MathOperator::Divide => {
                    if b.is_zero() {
                        return Err(EvaluationError::DivisionByZero);
                    }
                    a.checked_div(*b)
                }
            };
            result.map(Value::Decimal).ok_or_else(overflow)
        }
        _ => Err(EvaluationError::MathTypeMismatch {
            operator: operator.to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        }),
    }
}

/// Compare two resolved values.
///
/// Null, boolean and status code values support only `==` and `!=`; a null
/// equals only another null. Numeric kinds compare by value across kinds.
pub fn compare_values(
    left: &Value,
    right: &Value,
    operator: ComparisonOperator,
) -> EvaluationResult<bool> {
    match (left, right) {
        (Value::Null, Value::Null) => equality_only(operator, "null", true),
        (Value::Null, _) | (_, Value::Null) => equality_only(operator, "null", false),
        (Value::Boolean(a), Value::Boolean(b)) => equality_only(operator, "boolean", a == b),
        (Value::StatusCode(a), Value::StatusCode(b)) => {
            equality_only(operator, "status code", a == b)
        }
        _ => match numeric_ordering(left, right) {
            Some(ordering) => Ok(operator.matches(ordering)),
            None => Err(EvaluationError::IncompatibleComparison {
                left: left.type_name().to_string(),
                right: right.type_name().to_string(),
            }),
        },
    }
}

fn equality_only(
    operator: ComparisonOperator,
    value_type: &str,
    equal: bool,
) -> EvaluationResult<bool> {
    match operator {
        ComparisonOperator::Equal => Ok(equal),
        ComparisonOperator::NotEqual => Ok(!equal),
        _ => Err(EvaluationError::UnsupportedOperator {
            operator: operator.to_string(),
            value_type: value_type.to_string(),
        }),
    }
}

fn numeric_ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Unsigned(a), Value::Unsigned(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Unsigned(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Unsigned(a), Value::Integer(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        _ => Some(as_decimal(left)?.cmp(&as_decimal(right)?)),
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(i) => Some(Decimal::from(*i)),
        Value::Unsigned(u) => Some(Decimal::from(*u)),
        Value::Decimal(d) => Some(*d),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComparisonOperator::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[rstest]
    #[case(MathOperator::Add, 6, 3, 9)]
    #[case(MathOperator::Subtract, 6, 3, 3)]
    #[case(MathOperator::Multiply, 6, 3, 18)]
    #[case(MathOperator::Divide, 6, 3, 2)]
    fn test_integer_math(
        #[case] op: MathOperator,
        #[case] a: i64,
        #[case] b: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(
            apply_math(op, &Value::Integer(a), &Value::Integer(b)).unwrap(),
            Value::Integer(expected)
        );
    }

    #[test]
    fn test_decimal_math() {
        let result = apply_math(
            MathOperator::Multiply,
            &Value::Decimal(dec("1.5")),
            &Value::Decimal(dec("4")),
        )
        .unwrap();
        assert_eq!(result, Value::Decimal(dec("6.0")));
        let result = apply_math(
            MathOperator::Divide,
            &Value::Decimal(dec("3")),
            &Value::Decimal(dec("2")),
        )
        .unwrap();
        assert_eq!(result, Value::Decimal(dec("1.5")));
    }

    #[test]
    fn test_math_errors() {
        assert_eq!(
            apply_math(MathOperator::Divide, &Value::Integer(1), &Value::Integer(0)),
            Err(EvaluationError::DivisionByZero)
        );
        assert!(matches!(
            apply_math(MathOperator::Add, &Value::Integer(i64::MAX), &Value::Integer(1)),
            Err(EvaluationError::Overflow { .. })
        ));
        assert!(matches!(
            apply_math(MathOperator::Add, &Value::Integer(1), &Value::Decimal(dec("1"))),
            Err(EvaluationError::MathTypeMismatch { .. })
        ));
        assert!(matches!(
            apply_math(MathOperator::Add, &Value::Unsigned(1), &Value::Unsigned(1)),
            Err(EvaluationError::MathTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_null_comparisons() {
        assert_eq!(compare_values(&Value::Null, &Value::Null, Equal), Ok(true));
        assert_eq!(compare_values(&Value::Null, &Value::Integer(1), Equal), Ok(false));
        assert_eq!(compare_values(&Value::Integer(1), &Value::Null, NotEqual), Ok(true));
        assert!(matches!(
            compare_values(&Value::Null, &Value::Integer(1), LessThan),
            Err(EvaluationError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_equality_only_kinds() {
        let busy = Value::StatusCode("Busy".into());
        assert_eq!(compare_values(&busy, &busy, Equal), Ok(true));
        assert_eq!(
            compare_values(&Value::Boolean(true), &Value::Boolean(false), NotEqual),
            Ok(true)
        );
        assert!(compare_values(&Value::Boolean(true), &Value::Boolean(false), GreaterThan).is_err());
        assert!(matches!(
            compare_values(&Value::Boolean(true), &Value::Integer(1), Equal),
            Err(EvaluationError::IncompatibleComparison { .. })
        ));
    }

    #[rstest]
    #[case(Value::Integer(3), Value::Integer(4), LessThan, true)]
    #[case(Value::Integer(-1), Value::Unsigned(0), LessThan, true)]
    #[case(Value::Unsigned(0xFF), Value::Integer(255), Equal, true)]
    #[case(Value::Decimal(Decimal::new(25, 1)), Value::Integer(2), GreaterThan, true)]
    #[case(Value::Unsigned(3), Value::Decimal(Decimal::new(30, 1)), GreaterThanOrEqual, true)]
    #[case(Value::Integer(5), Value::Integer(5), NotEqual, false)]
    fn test_numeric_comparisons(
        #[case] left: Value,
        #[case] right: Value,
        #[case] op: ComparisonOperator,
        #[case] expected: bool,
    ) {
        assert_eq!(compare_values(&left, &right, op), Ok(expected));
    }

    #[test]
    fn test_operand_resolution() {
        let ctx = Context::new().with_value("MinLevel", 2i64);
        let sum = ComparisonValue::math(
            MathOperator::Multiply,
            ComparisonValue::identifier("MinLevel"),
            ComparisonValue::int(5),
        );
        assert_eq!(sum.value(&ctx).unwrap(), Value::Integer(10));
        assert_eq!(
            ComparisonValue::identifier("Missing").value(&ctx).unwrap(),
            Value::Null
        );
        assert!(sum.compare(&ctx, &ComparisonValue::int(10), Equal).unwrap());
    }
}
