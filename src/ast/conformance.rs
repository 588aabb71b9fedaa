//! Conformance statements and otherwise chains

use super::choice::Choice;
use super::expression::Expression;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single conformance statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Conformance {
    /// `M`, or a bare expression (`AB & CD`)
    Mandatory {
        /// Guarding expression; `None` means unconditional
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<Expression>,
    },

    /// `O`, or a bracketed expression (`[AB]`), with an optional choice suffix
    Optional {
        /// Guarding expression; `None` means unconditional
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<Expression>,
        /// Choice constraint (`.a+`)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        choice: Option<Choice>,
    },

    /// `P`
    Provisional,

    /// `D`
    Deprecated,

    /// `X`
    Disallowed,

    /// `desc`: conformance is described in the prose
    Described,

    /// Text that could not be classified
    Generic {
        /// Original text
        raw: String,
    },
}

impl Conformance {
    /// Unconditional mandatory
    pub fn mandatory() -> Self {
        Self::Mandatory { expression: None }
    }

    /// Mandatory when `expression` holds
    pub fn mandatory_if(expression: Expression) -> Self {
        Self::Mandatory {
            expression: Some(expression),
        }
    }

    /// Unconditional optional
    pub fn optional() -> Self {
        Self::Optional {
            expression: None,
            choice: None,
        }
    }

    /// Optional when `expression` holds
    pub fn optional_if(expression: Expression) -> Self {
        Self::Optional {
            expression: Some(expression),
            choice: None,
        }
    }

    /// Provisional
    pub fn provisional() -> Self {
        Self::Provisional
    }

    /// Deprecated
    pub fn deprecated() -> Self {
        Self::Deprecated
    }

    /// Disallowed
    pub fn disallowed() -> Self {
        Self::Disallowed
    }

    /// Described in prose
    pub fn described() -> Self {
        Self::Described
    }

    /// Unclassified text
    pub fn generic(raw: impl Into<String>) -> Self {
        Self::Generic { raw: raw.into() }
    }

    /// Attach a choice constraint to an optional conformance.
    ///
    /// Other variants are returned unchanged.
    pub fn with_choice(self, choice: Choice) -> Self {
        match self {
            Self::Optional { expression, .. } => Self::Optional {
                expression,
                choice: Some(choice),
            },
            other => other,
        }
    }

    /// The guarding expression, if any
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Self::Mandatory { expression } | Self::Optional { expression, .. } => {
                expression.as_ref()
            }
            _ => None,
        }
    }

    /// Discriminator used for JSON encoding
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mandatory { .. } => "mandatory",
            Self::Optional { .. } => "optional",
            Self::Provisional => "provisional",
            Self::Deprecated => "deprecated",
            Self::Disallowed => "disallowed",
            Self::Described => "described",
            Self::Generic { .. } => "generic",
        }
    }

    /// Whether no later member of a chain can be reached after this one
    pub(crate) fn is_terminal(&self) -> bool {
        match self {
            Self::Mandatory { expression } => expression.is_none(),
            Self::Optional { .. } | Self::Provisional | Self::Deprecated | Self::Disallowed => {
                true
            }
            Self::Described | Self::Generic { .. } => false,
        }
    }
}

/// Canonical specification text form
impl fmt::Display for Conformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mandatory { expression: None } => f.write_str("M"),
            Self::Mandatory {
                expression: Some(expression),
            } => write!(f, "{expression}"),
            Self::Optional { expression, choice } => {
                match expression {
                    Some(expression) => write!(f, "[{expression}]")?,
                    None => f.write_str("O")?,
                }
                match choice {
                    Some(choice) => write!(f, "{choice}"),
                    None => Ok(()),
                }
            }
            Self::Provisional => f.write_str("P"),
            Self::Deprecated => f.write_str("D"),
            Self::Disallowed => f.write_str("X"),
            Self::Described => f.write_str("desc"),
            Self::Generic { raw } => f.write_str(raw),
        }
    }
}

/// Ordered "otherwise" chain of conformance statements
///
/// Member order is significant: evaluation takes the first member that
/// applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConformanceSet(Vec<Conformance>);

impl ConformanceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Members in chain order
    pub fn members(&self) -> &[Conformance] {
        &self.0
    }

    /// First member of the chain
    pub fn first(&self) -> Option<&Conformance> {
        self.0.first()
    }

    /// Append a member at the end of the chain
    pub fn push(&mut self, conformance: Conformance) {
        self.0.push(conformance);
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set has no members
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over members in chain order
    pub fn iter(&self) -> std::slice::Iter<'_, Conformance> {
        self.0.iter()
    }
}

impl From<Conformance> for ConformanceSet {
    fn from(conformance: Conformance) -> Self {
        Self(vec![conformance])
    }
}

impl From<Vec<Conformance>> for ConformanceSet {
    fn from(members: Vec<Conformance>) -> Self {
        Self(members)
    }
}

impl FromIterator<Conformance> for ConformanceSet {
    fn from_iter<T: IntoIterator<Item = Conformance>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ConformanceSet {
    type Item = &'a Conformance;
    type IntoIter = std::slice::Iter<'a, Conformance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ConformanceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}
