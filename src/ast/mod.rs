//! Abstract Syntax Tree (AST) definitions for conformance expressions
//!
//! This module provides the types produced by the parser and consumed by the
//! evaluator. AST values are immutable once built and can be shared freely.

#![warn(missing_docs)]

mod choice;
mod conformance;
mod describe;
mod expression;
pub mod json;
mod operator;
pub mod revision;
mod value;
mod visitor;

pub use choice::*;
pub use conformance::*;
pub use expression::*;
pub use json::{JsonCodec, SerializationError};
pub use operator::*;
pub use revision::RevisionBounds;
pub use value::*;
pub use visitor::*;
