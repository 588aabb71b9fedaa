//! Conformance evaluator
//!
//! Evaluation is a direct walk of the AST. `eval` methods live on the AST
//! types themselves ([`crate::ast::ConformanceSet::eval`],
//! [`crate::ast::Conformance::eval`], [`crate::ast::Expression::eval`]) and
//! all take a mutable [`Context`] so identifier resolution can share one
//! visited set across the whole call.

#![warn(missing_docs)]

mod conformance;
mod context;
mod error;
mod expression;
mod queries;
mod resolution;
mod value;

pub use context::{Context, REVISION, ZIGBEE};
pub use error::{EvaluationError, EvaluationResult};
pub use queries::is_zigbee_only;
pub use value::{apply_math, compare_values};
