//! Conformance node and otherwise-chain evaluation

use super::context::Context;
use super::error::EvaluationResult;
use crate::ast::{Conformance, ConformanceSet, Expression};
use crate::model::{Confidence, ConformanceState, State};

/// `state` when the guard holds (or is absent), [`State::Unknown`] otherwise
fn guarded(
    state: State,
    expression: Option<&Expression>,
    ctx: &mut Context<'_>,
) -> EvaluationResult<ConformanceState> {
    let Some(expression) = expression else {
        return Ok(ConformanceState::definite(state));
    };
    let result = expression.eval(ctx)?;
    let state = if result.value { state } else { State::Unknown };
    Ok(ConformanceState::new(state, result.confidence))
}

impl Conformance {
    /// Evaluate a single conformance statement
    pub fn eval(&self, ctx: &mut Context<'_>) -> EvaluationResult<ConformanceState> {
        match self {
            Self::Mandatory { expression } => guarded(State::Mandatory, expression.as_ref(), ctx),
            Self::Optional { expression, .. } => {
                guarded(State::Optional, expression.as_ref(), ctx)
            }
            Self::Provisional => Ok(ConformanceState::definite(State::Provisional)),
            Self::Deprecated => Ok(ConformanceState::definite(State::Deprecated)),
            Self::Disallowed => Ok(ConformanceState::definite(State::Disallowed)),
            Self::Described => Ok(ConformanceState::new(State::Optional, Confidence::Possible)),
            Self::Generic { .. } => Ok(ConformanceState::new(State::Unknown, Confidence::Impossible)),
        }
    }
}

impl ConformanceSet {
    /// Evaluate the otherwise chain.
    ///
    /// The first member with a state other than [`State::Unknown`] decides.
    /// An exhausted (or empty) chain is [`State::Disallowed`]. Members skipped
    /// with less than definite confidence weaken the final confidence.
    pub fn eval(&self, ctx: &mut Context<'_>) -> EvaluationResult<ConformanceState> {
        let mut skipped = Confidence::Definite;
        for member in self {
            let result = member.eval(ctx)?;
            if result.state != State::Unknown {
                return Ok(ConformanceState::new(
                    result.state,
                    result.confidence.weakest(skipped),
                ));
            }
            skipped = skipped.weakest(result.confidence);
        }
        Ok(ConformanceState::new(State::Disallowed, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Choice, ComparisonOperator};
    use pretty_assertions::assert_eq;

    fn eval(set: &ConformanceSet, ctx: &mut Context<'_>) -> ConformanceState {
        set.eval(ctx).unwrap()
    }

    #[test]
    fn test_fixed_states() {
        let mut ctx = Context::new();
        assert_eq!(
            Conformance::provisional().eval(&mut ctx).unwrap(),
            ConformanceState::definite(State::Provisional)
        );
        assert_eq!(
            Conformance::described().eval(&mut ctx).unwrap(),
            ConformanceState::new(State::Optional, Confidence::Possible)
        );
        assert_eq!(
            Conformance::generic("see text").eval(&mut ctx).unwrap(),
            ConformanceState::new(State::Unknown, Confidence::Impossible)
        );
        assert_eq!(
            Conformance::optional()
                .with_choice(Choice::exactly_one("a"))
                .eval(&mut ctx)
                .unwrap(),
            ConformanceState::definite(State::Optional)
        );
    }

    #[test]
    fn test_guarded_members() {
        let member = Conformance::mandatory_if(Expression::feature("AB"));
        assert_eq!(
            member.eval(&mut Context::new()).unwrap().state,
            State::Unknown
        );
        assert_eq!(
            member
                .eval(&mut Context::new().with_value("AB", true))
                .unwrap()
                .state,
            State::Mandatory
        );
    }

    #[test]
    fn test_first_match_wins() {
        let set = ConformanceSet::from(vec![
            Conformance::mandatory_if(Expression::feature("AB")),
            Conformance::optional_if(Expression::feature("CD")),
        ]);
        let mut both = Context::new().with_value("AB", true).with_value("CD", true);
        assert_eq!(eval(&set, &mut both).state, State::Mandatory);
        let mut cd = Context::new().with_value("CD", true);
        assert_eq!(eval(&set, &mut cd).state, State::Optional);
        assert_eq!(eval(&set, &mut Context::new()).state, State::Disallowed);
    }

    #[test]
    fn test_empty_set_is_disallowed() {
        assert_eq!(
            eval(&ConformanceSet::new(), &mut Context::new()),
            ConformanceState::definite(State::Disallowed)
        );
    }

    #[test]
    fn test_skipped_uncertain_members_weaken_confidence() {
        let set = ConformanceSet::from(vec![
            Conformance::generic("see text"),
            Conformance::mandatory(),
        ]);
        assert_eq!(
            eval(&set, &mut Context::new()),
            ConformanceState::new(State::Mandatory, Confidence::Impossible)
        );

        let set = ConformanceSet::from(vec![
            Conformance::mandatory_if(
                Expression::revision(ComparisonOperator::GreaterThan, 9)
                    .negated()
                    .unwrap(),
            ),
            Conformance::optional(),
        ]);
        // Without a revision the guard is possibly true
        assert_eq!(
            eval(&set, &mut Context::new()),
            ConformanceState::new(State::Mandatory, Confidence::Possible)
        );
        // A definite false guard is skipped without weakening
        assert_eq!(
            eval(&set, &mut Context::new().with_revision(12)),
            ConformanceState::definite(State::Optional)
        );
    }
}
