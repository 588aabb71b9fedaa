//! Expression AST node definitions

use super::operator::{ComparisonOperator, LogicalOperator};
use super::value::ComparisonValue;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Boolean-valued conformance expression
///
/// Large variants are boxed to keep the enum small.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expression {
    /// Named specification element (`OnOff`, `Zigbee`)
    Identifier {
        /// Identifier name
        id: String,
        /// Negated with `!`
        #[serde(default)]
        not: bool,
    },

    /// Feature code (`LT`, `DF`)
    Feature {
        /// Feature code
        id: String,
        /// Negated with `!`
        #[serde(default)]
        not: bool,
    },

    /// Cross-reference to another entity (`<<ref_Scenes>>`)
    Reference {
        /// Cross-reference id
        id: String,
        /// Optional display label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        /// Negated with `!`
        #[serde(default)]
        not: bool,
    },

    /// Boolean equality between two expressions (`AB == CD`, `AB != CD`)
    Equality(Box<EqualityData>),

    /// N-ary logical chain (`AB & CD & EF`)
    Logical(Box<LogicalData>),

    /// Comparison between two values (`MaxLevel > 10`)
    Comparison(Box<ComparisonData>),

    /// Current revision against a literal (`Rev >= v3`)
    Revision {
        /// The operator
        operator: ComparisonOperator,
        /// Revision literal
        revision: u64,
    },

    /// Current revision bounded on both sides (`v2 <= Rev < v5`)
    RevisionRange(Box<RevisionRangeData>),
}

/// Equality expression data (separate struct to optimize enum size)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EqualityData {
    /// `!=` instead of `==`
    #[serde(default)]
    pub not: bool,
    /// Left operand
    pub left: Expression,
    /// Right operand
    pub right: Expression,
}

/// Logical expression data (separate struct to optimize enum size)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalData {
    /// Operator joining every operand
    pub operand: LogicalOperator,
    /// Inverts the combined result
    #[serde(default)]
    pub not: bool,
    /// First operand
    pub left: Expression,
    /// Remaining operands, in source order
    pub right: SmallVec<[Expression; 2]>,
}

/// Comparison expression data (separate struct to optimize enum size)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonData {
    /// The operator
    pub operator: ComparisonOperator,
    /// Left operand
    pub left: ComparisonValue,
    /// Right operand
    pub right: ComparisonValue,
}

/// Revision range data: `left left_operator Rev right_operator right`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionRangeData {
    /// Revision literal before `Rev`
    pub left: u64,
    /// Operator between `left` and `Rev`
    pub left_operator: ComparisonOperator,
    /// Operator between `Rev` and `right`
    pub right_operator: ComparisonOperator,
    /// Revision literal after `Rev`
    pub right: u64,
}

impl Expression {
    /// Create an identifier expression
    pub fn identifier(id: impl Into<String>) -> Self {
        Self::Identifier {
            id: id.into(),
            not: false,
        }
    }

    /// Create a feature expression
    pub fn feature(id: impl Into<String>) -> Self {
        Self::Feature {
            id: id.into(),
            not: false,
        }
    }

    /// Create a reference expression
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference {
            id: id.into(),
            label: None,
            not: false,
        }
    }

    /// Create a logical chain
    pub fn logical(
        operand: LogicalOperator,
        left: Expression,
        right: impl IntoIterator<Item = Expression>,
    ) -> Self {
        Self::Logical(Box::new(LogicalData {
            operand,
            not: false,
            left,
            right: right.into_iter().collect(),
        }))
    }

    /// Create an `&` chain
    pub fn and(left: Expression, right: impl IntoIterator<Item = Expression>) -> Self {
        Self::logical(LogicalOperator::And, left, right)
    }

    /// Create an `|` chain
    pub fn or(left: Expression, right: impl IntoIterator<Item = Expression>) -> Self {
        Self::logical(LogicalOperator::Or, left, right)
    }

    /// Create an `^` chain
    pub fn xor(left: Expression, right: impl IntoIterator<Item = Expression>) -> Self {
        Self::logical(LogicalOperator::Xor, left, right)
    }

    /// Create an equality (`==`) expression
    pub fn equality(left: Expression, right: Expression) -> Self {
        Self::Equality(Box::new(EqualityData {
            not: false,
            left,
            right,
        }))
    }

    /// Create a comparison expression
    pub fn comparison(
        operator: ComparisonOperator,
        left: ComparisonValue,
        right: ComparisonValue,
    ) -> Self {
        Self::Comparison(Box::new(ComparisonData {
            operator,
            left,
            right,
        }))
    }

    /// Create a single-bound revision expression
    pub fn revision(operator: ComparisonOperator, revision: u64) -> Self {
        Self::Revision { operator, revision }
    }

    /// Create a revision range without validating it.
    ///
    /// See [`crate::ast::revision::validate_range`] for the checks the parser
    /// applies.
    pub fn revision_range(
        left: u64,
        left_operator: ComparisonOperator,
        right_operator: ComparisonOperator,
        right: u64,
    ) -> Self {
        Self::RevisionRange(Box::new(RevisionRangeData {
            left,
            left_operator,
            right_operator,
            right,
        }))
    }

    /// The logically inverted expression.
    ///
    /// Identifier-like nodes, logical chains and equalities flip their `not`
    /// flag; comparisons and single revisions invert their operator. A revision
    /// range has no single-node inverse and yields `None`.
    pub fn negated(self) -> Option<Self> {
        let negated = match self {
            Self::Identifier { id, not } => Self::Identifier { id, not: !not },
            Self::Feature { id, not } => Self::Feature { id, not: !not },
            Self::Reference { id, label, not } => Self::Reference {
                id,
                label,
                not: !not,
            },
            Self::Equality(mut data) => {
                data.not = !data.not;
                Self::Equality(data)
            }
            Self::Logical(mut data) => {
                data.not = !data.not;
                Self::Logical(data)
            }
            Self::Comparison(mut data) => {
                data.operator = data.operator.negate();
                Self::Comparison(data)
            }
            Self::Revision { operator, revision } => Self::Revision {
                operator: operator.negate(),
                revision,
            },
            Self::RevisionRange(_) => return None,
        };
        Some(negated)
    }

    /// Discriminator used for JSON encoding
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Identifier { .. } => "identifier",
            Self::Feature { .. } => "feature",
            Self::Reference { .. } => "reference",
            Self::Equality(_) => "equality",
            Self::Logical(_) => "logical",
            Self::Comparison(_) => "comparison",
            Self::Revision { .. } => "revision",
            Self::RevisionRange(_) => "revisionRange",
        }
    }

    /// Write an expression nested inside another, parenthesizing compound forms
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical(data) if !data.not => write!(f, "({self})"),
            Self::Equality(_) | Self::Comparison(_) | Self::RevisionRange(_) => {
                write!(f, "({self})")
            }
            _ => write!(f, "{self}"),
        }
    }
}

fn bang(not: bool) -> &'static str {
    if not { "!" } else { "" }
}

/// Canonical specification text form
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { id, not } | Self::Feature { id, not } => {
                write!(f, "{}{id}", bang(*not))
            }
            Self::Reference { id, label, not } => match label {
                Some(label) => write!(f, "{}<<{id}, {label}>>", bang(*not)),
                None => write!(f, "{}<<{id}>>", bang(*not)),
            },
            Self::Equality(data) => {
                data.left.fmt_operand(f)?;
                f.write_str(if data.not { " != " } else { " == " })?;
                data.right.fmt_operand(f)
            }
            Self::Logical(data) => {
                if data.not {
                    f.write_str("!(")?;
                }
                data.left.fmt_operand(f)?;
                for right in &data.right {
                    write!(f, " {} ", data.operand)?;
                    right.fmt_operand(f)?;
                }
                if data.not {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::Comparison(data) => {
                write!(f, "{} {} {}", data.left, data.operator, data.right)
            }
            Self::Revision { operator, revision } => write!(f, "Rev {operator} v{revision}"),
            Self::RevisionRange(data) => write!(
                f,
                "v{} {} Rev {} v{}",
                data.left, data.left_operator, data.right_operator, data.right
            ),
        }
    }
}
