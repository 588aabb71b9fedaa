//! Evaluation outcomes: conformance state and confidence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Conformance state produced by evaluating a conformance node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum State {
    /// The node does not apply; the next member of the chain is tried
    #[default]
    Unknown,
    /// The element must be implemented
    Mandatory,
    /// The element may be implemented
    Optional,
    /// The element is provisional
    Provisional,
    /// The element is deprecated
    Deprecated,
    /// The element must not be implemented
    Disallowed,
}

impl State {
    /// Whether an element in this state exists in some form.
    ///
    /// Used when an identifier resolves to another entity's conformance.
    pub fn exists(self) -> bool {
        matches!(
            self,
            Self::Mandatory | Self::Optional | Self::Provisional | Self::Deprecated
        )
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Mandatory => "mandatory",
            Self::Optional => "optional",
            Self::Provisional => "provisional",
            Self::Deprecated => "deprecated",
            Self::Disallowed => "disallowed",
        };
        f.write_str(name)
    }
}

/// How certain an evaluation result is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Confidence {
    /// Fully determined by the context
    #[default]
    Definite,
    /// Depends on information the context does not carry
    Possible,
    /// Cannot be determined by the engine at all
    Impossible,
}

impl Confidence {
    const fn rank(self) -> u8 {
        match self {
            Self::Definite => 2,
            Self::Possible => 1,
            Self::Impossible => 0,
        }
    }

    /// The weaker of two confidences
    pub fn weakest(self, other: Confidence) -> Confidence {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }

    /// Check if this is [`Confidence::Definite`]
    pub fn is_definite(self) -> bool {
        matches!(self, Self::Definite)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Definite => "definite",
            Self::Possible => "possible",
            Self::Impossible => "impossible",
        };
        f.write_str(name)
    }
}

/// Result of evaluating a conformance node or set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConformanceState {
    /// The resulting state
    pub state: State,
    /// Confidence in the state
    pub confidence: Confidence,
}

impl ConformanceState {
    /// Create a state with the given confidence
    pub const fn new(state: State, confidence: Confidence) -> Self {
        Self { state, confidence }
    }

    /// Create a definite state
    pub const fn definite(state: State) -> Self {
        Self::new(state, Confidence::Definite)
    }
}

impl fmt::Display for ConformanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.state, self.confidence)
    }
}

/// Result of evaluating a boolean expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpressionResult {
    /// Truth value
    pub value: bool,
    /// Confidence in the truth value
    pub confidence: Confidence,
}

impl ExpressionResult {
    /// Create a result with the given confidence
    pub const fn new(value: bool, confidence: Confidence) -> Self {
        Self { value, confidence }
    }

    /// Create a definite result
    pub const fn definite(value: bool) -> Self {
        Self::new(value, Confidence::Definite)
    }

    /// Check if the result is true
    pub fn is_true(&self) -> bool {
        self.value
    }
}
