// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Entity lookup capability used by identifier resolution
//!
//! The document model that owns specification entities lives outside this
//! crate. Conformance expressions only refer to other entities by string id,
//! and the evaluator asks an [`EntityStore`] to look them up.

use crate::ast::ConformanceSet;
use rustc_hash::FxHashMap;

/// A specification entity an identifier can resolve to
pub trait Entity {
    /// The entity's own conformance, if it has one.
    ///
    /// Entities without conformance are not resolvable and evaluate as absent.
    fn conformance(&self) -> Option<&ConformanceSet> {
        None
    }
}

/// Lookup of specification entities by name or cross-reference id
pub trait EntityStore {
    /// Find an entity by its identifier name (e.g. `OnOff`, `LT`)
    fn identifier(&self, name: &str) -> Option<&dyn Entity>;

    /// Find an entity by cross-reference id (e.g. `ref_Scenes`)
    fn reference(&self, _id: &str) -> Option<&dyn Entity> {
        None
    }
}

impl Entity for ConformanceSet {
    fn conformance(&self) -> Option<&ConformanceSet> {
        Some(self)
    }
}

/// Named entity held by a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEntity {
    /// Entity name
    pub name: String,
    /// Entity conformance, if any
    pub conformance: Option<ConformanceSet>,
}

impl MemoryEntity {
    /// Create an entity with a conformance
    pub fn new(name: impl Into<String>, conformance: ConformanceSet) -> Self {
        Self {
            name: name.into(),
            conformance: Some(conformance),
        }
    }

    /// Create an entity that has no conformance of its own
    pub fn without_conformance(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conformance: None,
        }
    }
}

impl Entity for MemoryEntity {
    fn conformance(&self) -> Option<&ConformanceSet> {
        self.conformance.as_ref()
    }
}

/// Simple in-memory entity store keyed by identifier and reference id
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    identifiers: FxHashMap<String, MemoryEntity>,
    references: FxHashMap<String, MemoryEntity>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its name
    pub fn insert_identifier(&mut self, entity: MemoryEntity) -> &mut Self {
        self.identifiers.insert(entity.name.clone(), entity);
        self
    }

    /// Register an entity under a cross-reference id
    pub fn insert_reference(&mut self, id: impl Into<String>, entity: MemoryEntity) -> &mut Self {
        self.references.insert(id.into(), entity);
        self
    }

    /// Builder-style variant of [`MemoryStore::insert_identifier`]
    pub fn with_identifier(mut self, name: impl Into<String>, conformance: ConformanceSet) -> Self {
        self.insert_identifier(MemoryEntity::new(name, conformance));
        self
    }

    /// Builder-style variant of [`MemoryStore::insert_reference`]
    pub fn with_reference(mut self, id: impl Into<String>, conformance: ConformanceSet) -> Self {
        let id = id.into();
        self.insert_reference(id.clone(), MemoryEntity::new(id, conformance));
        self
    }

    /// Number of registered entities across both namespaces
    pub fn len(&self) -> usize {
        self.identifiers.len() + self.references.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty() && self.references.is_empty()
    }
}

impl EntityStore for MemoryStore {
    fn identifier(&self, name: &str) -> Option<&dyn Entity> {
        self.identifiers.get(name).map(|e| e as &dyn Entity)
    }

    fn reference(&self, id: &str) -> Option<&dyn Entity> {
        self.references.get(id).map(|e| e as &dyn Entity)
    }
}
