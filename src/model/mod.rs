//! Runtime data model for conformance evaluation
//!
//! Values bound in a context, evaluation outcomes, and the entity store
//! capability the evaluator consults for identifier resolution.

#![warn(missing_docs)]

pub mod state;
pub mod store;
pub mod value;

pub use state::{Confidence, ConformanceState, ExpressionResult, State};
pub use store::{Entity, EntityStore, MemoryEntity, MemoryStore};
pub use value::Value;
