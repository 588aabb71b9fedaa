//! Human-readable descriptions of conformance
//!
//! Unlike the canonical `Display` form, a set's description is a summary: it
//! stops at the first member that ends the chain and omits anything after it.

use super::conformance::{Conformance, ConformanceSet};
use super::expression::Expression;
use super::revision::{range_source, validate_range};

impl Expression {
    /// English rendering of the expression (`"LT or DF"`)
    pub fn description(&self) -> String {
        match self {
            Self::Identifier { id, not } | Self::Feature { id, not } => negate(id, *not),
            Self::Reference { id, label, not } => negate(label.as_deref().unwrap_or(id), *not),
            Self::Equality(data) => {
                let verb = if data.not { "does not equal" } else { "equals" };
                format!(
                    "{} {verb} {}",
                    data.left.operand_description(),
                    data.right.operand_description()
                )
            }
            Self::Logical(data) => {
                let separator = format!(" {} ", data.operand.word());
                let joined = std::iter::once(&data.left)
                    .chain(data.right.iter())
                    .map(Expression::operand_description)
                    .collect::<Vec<_>>()
                    .join(&separator);
                if data.not {
                    format!("not ({joined})")
                } else {
                    joined
                }
            }
            Self::Comparison(data) => {
                format!("{} {} {}", data.left, data.operator.phrase(), data.right)
            }
            Self::Revision { operator, revision } => {
                format!("revision {} {revision}", operator.phrase())
            }
            Self::RevisionRange(data) => match validate_range(data, &range_source(data)) {
                Ok(bounds) if bounds.low == bounds.high => format!("revision {}", bounds.low),
                Ok(bounds) => format!("revision {} through {}", bounds.low, bounds.high),
                Err(_) => range_source(data),
            },
        }
    }

    fn operand_description(&self) -> String {
        match self {
            Self::Logical(data) if !data.not => format!("({})", self.description()),
            Self::Equality(_) => format!("({})", self.description()),
            _ => self.description(),
        }
    }
}

fn negate(name: &str, not: bool) -> String {
    if not {
        format!("not {name}")
    } else {
        name.to_string()
    }
}

impl Conformance {
    /// English rendering of a single statement (`"optional if AB"`)
    pub fn description(&self) -> String {
        match self {
            Self::Mandatory { expression: None } => "mandatory".to_string(),
            Self::Mandatory {
                expression: Some(expr),
            } => format!("mandatory if {}", expr.description()),
            Self::Optional { expression, choice } => {
                let mut out = match expression {
                    Some(expr) => format!("optional if {}", expr.description()),
                    None => "optional".to_string(),
                };
                if let Some(choice) = choice {
                    out.push_str(&format!(" ({})", choice.description()));
                }
                out
            }
            Self::Provisional => "provisional".to_string(),
            Self::Deprecated => "deprecated".to_string(),
            Self::Disallowed => "disallowed".to_string(),
            Self::Described => "described in text".to_string(),
            Self::Generic { raw } => raw.clone(),
        }
    }
}

impl ConformanceSet {
    /// Summary of the chain (`"mandatory if AB, otherwise optional"`).
    ///
    /// Rendering stops after the first member that ends the chain (optional,
    /// provisional, deprecated, disallowed, or unconditional mandatory). A
    /// multi-member chain that never reaches such a member ends with
    /// `", otherwise disallowed"`.
    pub fn description(&self) -> String {
        let mut parts = Vec::with_capacity(self.len());
        let mut terminated = false;
        for member in self {
            parts.push(member.description());
            if member.is_terminal() {
                terminated = true;
                break;
            }
        }
        let mut out = parts.join(", otherwise ");
        if self.len() > 1 && !terminated {
            out.push_str(", otherwise disallowed");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Choice, ChoiceLimit, ComparisonOperator};

    #[test]
    fn test_expression_descriptions() {
        let expr = Expression::and(
            Expression::or(Expression::feature("VIS"), [Expression::feature("AUD")]),
            [Expression::feature("SPRS")],
        );
        assert_eq!(expr.description(), "(VIS or AUD) and SPRS");

        let eq = Expression::equality(Expression::feature("CD"), Expression::feature("EF"))
            .negated()
            .unwrap();
        assert_eq!(eq.description(), "CD does not equal EF");

        let range = Expression::revision_range(
            2,
            ComparisonOperator::LessThanOrEqual,
            ComparisonOperator::LessThan,
            5,
        );
        assert_eq!(range.description(), "revision 2 through 4");
        assert_eq!(
            Expression::revision(ComparisonOperator::GreaterThanOrEqual, 3).description(),
            "revision is greater than or equal to 3"
        );
    }

    #[test]
    fn test_set_description_stops_at_terminal_member() {
        let set = ConformanceSet::from(vec![
            Conformance::mandatory_if(Expression::feature("AB")),
            Conformance::optional(),
            Conformance::mandatory(),
        ]);
        assert_eq!(set.description(), "mandatory if AB, otherwise optional");
    }

    #[test]
    fn test_set_description_appends_disallowed() {
        let set = ConformanceSet::from(vec![
            Conformance::mandatory_if(Expression::feature("AB")),
            Conformance::described(),
        ]);
        assert_eq!(
            set.description(),
            "mandatory if AB, otherwise described in text, otherwise disallowed"
        );

        let single = ConformanceSet::from(Conformance::mandatory_if(Expression::feature("AB")));
        assert_eq!(single.description(), "mandatory if AB");
    }

    #[test]
    fn test_choice_in_description() {
        let set = ConformanceSet::from(
            Conformance::optional().with_choice(Choice::new("a", ChoiceLimit::Min { min: 1 })),
        );
        assert_eq!(set.description(), "optional (at least 1 of a)");
    }
}
