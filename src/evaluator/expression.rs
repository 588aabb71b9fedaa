//! Boolean expression evaluation

use super::context::{Context, REVISION};
use super::error::{EvaluationError, EvaluationResult};
use super::resolution::{Namespace, resolve};
use crate::ast::revision::range_contains;
use crate::ast::{Expression, LogicalData};
use crate::model::{Confidence, ExpressionResult, Value};

impl Expression {
    /// Evaluate the expression.
    ///
    /// Never mutates the expression. The context's visited set grows as
    /// unbound identifiers are resolved through the entity store.
    pub fn eval(&self, ctx: &mut Context<'_>) -> EvaluationResult<ExpressionResult> {
        match self {
            Self::Identifier { id, not } | Self::Feature { id, not } => {
                lookup(ctx, Namespace::Identifier, id, *not)
            }
            Self::Reference { id, not, .. } => lookup(ctx, Namespace::Reference, id, *not),
            Self::Equality(data) => {
                let left = data.left.eval(ctx)?;
                let right = data.right.eval(ctx)?;
                Ok(ExpressionResult::new(
                    (left.value == right.value) != data.not,
                    left.confidence.weakest(right.confidence),
                ))
            }
            Self::Logical(data) => eval_logical(data, ctx),
            Self::Comparison(data) => {
                let value = data.left.compare(ctx, &data.right, data.operator)?;
                Ok(ExpressionResult::definite(value))
            }
            Self::Revision { operator, revision } => {
                eval_revision(ctx, |current| operator.matches(current.cmp(revision)))
            }
            Self::RevisionRange(range) => eval_revision(ctx, |current| range_contains(range, current)),
        }
    }
}

/// A bound boolean is used directly and a bound null counts as false.
/// Unbound names are resolved through the entity store.
fn lookup(
    ctx: &mut Context<'_>,
    namespace: Namespace,
    id: &str,
    not: bool,
) -> EvaluationResult<ExpressionResult> {
    match ctx.value(id) {
        Some(Value::Boolean(b)) => Ok(ExpressionResult::definite(*b != not)),
        Some(Value::Null) => Ok(ExpressionResult::definite(not)),
        Some(other) => Err(EvaluationError::UnexpectedValueType {
            name: id.to_string(),
            expected: "boolean".to_string(),
            actual: other.type_name().to_string(),
        }),
        None => resolve(ctx, namespace, id, not),
    }
}

/// Every operand is evaluated; there is no short-circuit
fn eval_logical(data: &LogicalData, ctx: &mut Context<'_>) -> EvaluationResult<ExpressionResult> {
    let first = data.left.eval(ctx)?;
    let mut value = first.value;
    let mut confidence = first.confidence;

    for operand in &data.right {
        let result = operand.eval(ctx)?;
        value = data.operand.apply(value, result.value);
        confidence = confidence.weakest(result.confidence);
    }

    Ok(ExpressionResult::new(value != data.not, confidence))
}

/// Without a bound revision every revision test passes, with `Possible`
/// confidence
fn eval_revision(
    ctx: &Context<'_>,
    test: impl FnOnce(u64) -> bool,
) -> EvaluationResult<ExpressionResult> {
    match ctx.value(REVISION) {
        None => Ok(ExpressionResult::new(true, Confidence::Possible)),
        Some(value) => match value.as_unsigned() {
            Some(current) => Ok(ExpressionResult::definite(test(current))),
            None => Err(EvaluationError::UnexpectedValueType {
                name: REVISION.to_string(),
                expected: "non-negative integer".to_string(),
                actual: value.type_name().to_string(),
            }),
        },
    }
}
