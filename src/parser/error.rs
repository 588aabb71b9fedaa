//! Parser error types

use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse error with location information
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unexpected token
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The unexpected token that was found
        token: String,
        /// Position where the token was found
        position: usize,
    },

    /// Expected token
    #[error("Expected {expected} at position {position}")]
    ExpectedToken {
        /// The expected token description
        expected: String,
        /// Position where the token was expected
        position: usize,
    },

    /// Unexpected end of input at specific position
    #[error("Unexpected end of input at position {position}")]
    UnexpectedEndOfInput {
        /// Position where more input was expected
        position: usize,
    },

    /// Invalid literal value
    #[error("Invalid {literal_type} literal at position {position}: {value}")]
    InvalidLiteral {
        /// Type of literal that failed to parse
        literal_type: String,
        /// The invalid value that was encountered
        value: String,
        /// Position where the invalid literal was found
        position: usize,
    },

    /// Unclosed `<<` reference
    #[error("Unclosed reference starting at position {position}")]
    UnclosedReference {
        /// Position of the opening `<<`
        position: usize,
    },

    /// Unrecognized character
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The character
        character: char,
        /// Position of the character
        position: usize,
    },

    /// Revision range that admits no revision or mixes directions
    #[error("Invalid revision range '{range}': {reason}")]
    InvalidRevisionRange {
        /// Source text of the range
        range: String,
        /// What is wrong with it
        reason: String,
    },

    /// Operator without a right-hand operand
    #[error("Missing operand after '{operator}' at position {position}")]
    MissingOperand {
        /// The dangling operator
        operator: String,
        /// Position of the operator
        position: usize,
    },
}

impl ParseError {
    /// Byte offset the error points at, when it has one
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::ExpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::InvalidLiteral { position, .. }
            | Self::UnclosedReference { position }
            | Self::UnexpectedCharacter { position, .. }
            | Self::MissingOperand { position, .. } => Some(*position),
            Self::InvalidRevisionRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ParseError::UnexpectedToken {
            token: ")".into(),
            position: 3,
        };
        assert_eq!(err.to_string(), "Unexpected token ')' at position 3");
        assert_eq!(err.position(), Some(3));

        let err = ParseError::InvalidRevisionRange {
            range: "v2 < Rev < v2".into(),
            reason: "range admits no revision".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid revision range 'v2 < Rev < v2': range admits no revision"
        );
        assert_eq!(err.position(), None);
    }
}
