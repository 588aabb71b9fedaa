//! Error types for the conformance engine
//!
//! Each layer has its own error enum; [`ConformanceError`] unifies them for
//! callers that drive parsing, evaluation and serialization together.

use crate::ast::SerializationError;
use crate::evaluator::EvaluationError;
use crate::parser::ParseError;
use thiserror::Error;

/// Result type alias for conformance operations
pub type Result<T> = std::result::Result<T, ConformanceError>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum ConformanceError {
    /// Conformance text that failed to parse
    #[error("Failed to parse conformance \"{input}\": {source}")]
    Parse {
        /// The raw conformance text
        input: String,
        /// Underlying parser error
        #[source]
        source: ParseError,
    },

    /// Parser error without the original text
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// Evaluation errors
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// JSON encoding or decoding errors
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}
