//! Conformance text parser
//!
//! Converts specification conformance text (`M`, `[LT | DF].a+`, `AB, O`)
//! into the AST defined in [`crate::ast`].

#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod lexer;
pub mod pratt;
pub mod span;
pub mod tokenizer;

pub use error::{ParseError, ParseResult};
pub use pratt::{Parser, parse_expression};
pub use span::Spanned;

use crate::ast::{Conformance, ConformanceSet};
use crate::error::{ConformanceError, Result};

/// Parse conformance text, reporting any syntax error.
///
/// Empty (or blank) input yields an empty set.
pub fn parse_conformance_strict(input: &str) -> Result<ConformanceSet> {
    let parse = || -> ParseResult<ConformanceSet> {
        let mut parser = Parser::new(input)?;
        let set = parser.parse_set()?;
        parser.finish()?;
        Ok(set)
    };
    parse().map_err(|source| ConformanceError::Parse {
        input: input.to_string(),
        source,
    })
}

/// Parse conformance text, never failing.
///
/// Text that does not parse becomes a single [`Conformance::Generic`] member
/// holding the trimmed input.
pub fn parse_conformance(input: &str) -> ConformanceSet {
    match parse_conformance_strict(input) {
        Ok(set) => set,
        Err(err) => {
            log::debug!("keeping unparsed conformance as generic text: {err}");
            ConformanceSet::from(Conformance::generic(input.trim()))
        }
    }
}
