// Evaluation context for conformance expressions

use crate::model::{EntityStore, Value};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Name of the context value holding the specification revision
pub const REVISION: &str = "Revision";

/// Name of the identifier bound when classifying Zigbee-only elements
pub const ZIGBEE: &str = "Zigbee";

/// Per-call evaluation state
///
/// Holds the bound values (features, attributes, `Revision`), the optional
/// entity store used to resolve unbound identifiers, and the set of names
/// already visited during resolution. The visited set is shared by every
/// resolution under one top-level call, so a context should not be reused
/// across unrelated evaluations.
#[derive(Default)]
pub struct Context<'a> {
    values: FxHashMap<String, Value>,
    store: Option<&'a dyn EntityStore>,
    visited: Option<FxHashSet<String>>,
}

impl<'a> Context<'a> {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a named value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_value(name, value);
        self
    }

    /// Attach the entity store used for identifier resolution
    pub fn with_store(mut self, store: &'a dyn EntityStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Bind the specification revision
    pub fn with_revision(self, revision: u64) -> Self {
        self.with_value(REVISION, revision)
    }

    /// Bind a named value in place
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a bound value
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The bound specification revision, if any
    pub fn revision(&self) -> Option<&Value> {
        self.value(REVISION)
    }

    /// The entity store, if any
    pub fn store(&self) -> Option<&'a dyn EntityStore> {
        self.store
    }

    /// Record `name` as visited; returns `false` if it already was
    pub(crate) fn visit(&mut self, name: &str) -> bool {
        let visited = self.visited.get_or_insert_with(FxHashSet::default);
        if visited.contains(name) {
            false
        } else {
            visited.insert(name.to_string());
            true
        }
    }

    /// Check if `name` was visited during resolution
    pub fn was_visited(&self, name: &str) -> bool {
        self.visited.as_ref().is_some_and(|v| v.contains(name))
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values)
            .field("store", &self.store.is_some())
            .field("visited", &self.visited)
            .finish()
    }
}
