//! Choice constraints attached to optional conformance (`O.a`, `[AB].b2+`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// "Pick N of the named group" constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    /// Name of the choice group (`a`, `b`, ...)
    pub set: String,
    /// How many members of the group are required
    pub limit: ChoiceLimit,
}

/// Cardinality of a [`Choice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChoiceLimit {
    /// Exactly `limit` members
    Exact {
        /// Required count
        limit: u32,
    },
    /// At least `min` members
    Min {
        /// Lower bound
        min: u32,
    },
    /// At most `max` members
    Max {
        /// Upper bound
        max: u32,
    },
    /// Between `min` and `max` members, inclusive
    Range {
        /// Lower bound
        min: u32,
        /// Upper bound
        max: u32,
    },
}

impl Default for ChoiceLimit {
    fn default() -> Self {
        Self::Exact { limit: 1 }
    }
}

impl Choice {
    /// Create a choice over `set`
    pub fn new(set: impl Into<String>, limit: ChoiceLimit) -> Self {
        Self {
            set: set.into(),
            limit,
        }
    }

    /// Choice of exactly one member of `set`
    pub fn exactly_one(set: impl Into<String>) -> Self {
        Self::new(set, ChoiceLimit::default())
    }

    /// Human-readable description (`"at least 2 of a"`)
    pub fn description(&self) -> String {
        let count = match self.limit {
            ChoiceLimit::Exact { limit } => format!("exactly {limit}"),
            ChoiceLimit::Min { min } => format!("at least {min}"),
            ChoiceLimit::Max { max } => format!("at most {max}"),
            ChoiceLimit::Range { min, max } => format!("between {min} and {max}"),
        };
        format!("{count} of {}", self.set)
    }
}

impl fmt::Display for ChoiceLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Exact { limit: 1 } => Ok(()),
            Self::Exact { limit } => write!(f, "{limit}"),
            Self::Min { min: 1 } => f.write_str("+"),
            Self::Min { min } => write!(f, "{min}+"),
            Self::Max { max } => write!(f, "-{max}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}

/// Renders the suffix form including the leading dot (`.a2+`)
impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}{}", self.set, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(Choice::exactly_one("a").to_string(), ".a");
        assert_eq!(Choice::new("a", ChoiceLimit::Exact { limit: 2 }).to_string(), ".a2");
        assert_eq!(Choice::new("a", ChoiceLimit::Min { min: 1 }).to_string(), ".a+");
        assert_eq!(Choice::new("b", ChoiceLimit::Min { min: 2 }).to_string(), ".b2+");
        assert_eq!(Choice::new("c", ChoiceLimit::Max { max: 3 }).to_string(), ".c-3");
        assert_eq!(
            Choice::new("d", ChoiceLimit::Range { min: 1, max: 2 }).to_string(),
            ".d1-2"
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(Choice::exactly_one("a"), Choice::new("a", ChoiceLimit::Exact { limit: 1 }));
        assert_ne!(Choice::exactly_one("a"), Choice::exactly_one("b"));
        assert_ne!(
            Choice::new("a", ChoiceLimit::Min { min: 1 }),
            Choice::new("a", ChoiceLimit::Exact { limit: 1 })
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(
            Choice::new("a", ChoiceLimit::Min { min: 1 }).description(),
            "at least 1 of a"
        );
    }
}
