//! Matter conformance expression engine
//!
//! Parses the conformance column of the Matter specification (`M`, `O`,
//! `[LT | DF].a+`, `AB, [CD]`, ...) and evaluates it against a context of
//! bound features, attributes and the specification revision.
//!
//! ```
//! use matter_conformance::{Context, State, parse_conformance};
//!
//! let set = parse_conformance("AB, [CD]");
//! let mut ctx = Context::new().with_value("CD", true);
//! assert_eq!(set.eval(&mut ctx).unwrap().state, State::Optional);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;

// Re-export main types
pub use ast::{Conformance, ConformanceSet, Expression, JsonCodec};
pub use error::{ConformanceError, Result};
pub use evaluator::{Context, EvaluationError, EvaluationResult, is_zigbee_only};
pub use model::{
    Confidence, ConformanceState, Entity, EntityStore, ExpressionResult, MemoryStore, State, Value,
};
pub use parser::{ParseError, parse_conformance, parse_conformance_strict, parse_expression};
