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

//! Resolution of unbound identifiers through the entity store
//!
//! An identifier that is not bound in the context stands for another entity.
//! It is true when that entity's own conformance evaluates to a state in
//! which the entity exists. Every name looked up is recorded in the
//! context's visited set, and a name seen a second time resolves to `false`
//! without being negated, which terminates reference cycles.

use super::context::Context;
use super::error::EvaluationResult;
use crate::model::{Entity, ExpressionResult};

/// Which store namespace a name is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Namespace {
    /// Identifier and feature names
    Identifier,
    /// Cross-reference ids
    Reference,
}

/// Resolve `id` against the context's entity store
pub(crate) fn resolve(
    ctx: &mut Context<'_>,
    namespace: Namespace,
    id: &str,
    not: bool,
) -> EvaluationResult<ExpressionResult> {
    let Some(store) = ctx.store() else {
        log::trace!("{id}: unbound and no entity store");
        return Ok(ExpressionResult::definite(not));
    };

    if !ctx.visit(id) {
        log::trace!("{id}: already visited, resolving to false");
        return Ok(ExpressionResult::definite(false));
    }

    let entity: Option<&dyn Entity> = match namespace {
        Namespace::Identifier => store.identifier(id),
        Namespace::Reference => store.reference(id),
    };
    let Some(conformance) = entity.and_then(|e| e.conformance()) else {
        log::trace!("{id}: no entity with conformance");
        return Ok(ExpressionResult::definite(not));
    };

    log::trace!("{id}: evaluating conformance {conformance}");
    let state = conformance.eval(ctx)?;
    log::trace!("{id}: resolved to {state}");
    Ok(ExpressionResult::new(
        state.state.exists() != not,
        state.confidence,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Conformance, ConformanceSet, Expression};
    use crate::model::{Confidence, MemoryEntity, MemoryStore};

    #[test]
    fn test_without_store() {
        let mut ctx = Context::new();
        assert!(!resolve(&mut ctx, Namespace::Identifier, "A", false).unwrap().value);
        assert!(resolve(&mut ctx, Namespace::Identifier, "A", true).unwrap().value);
        assert!(!ctx.was_visited("A"));
    }

    #[test]
    fn test_missing_entities_resolve_as_absent() {
        let mut store = MemoryStore::new();
        store.insert_identifier(MemoryEntity::without_conformance("Bare"));
        let mut ctx = Context::new().with_store(&store);
        assert!(!resolve(&mut ctx, Namespace::Identifier, "Bare", false).unwrap().value);
        assert!(resolve(&mut ctx, Namespace::Identifier, "Nowhere", true).unwrap().value);
    }

    #[test]
    fn test_entity_states() {
        let store = MemoryStore::new()
            .with_identifier("Mand", ConformanceSet::from(Conformance::mandatory()))
            .with_identifier("Gone", ConformanceSet::from(Conformance::disallowed()))
            .with_identifier("Prose", ConformanceSet::from(Conformance::described()))
            .with_reference("ref_Dep", ConformanceSet::from(Conformance::deprecated()));
        let mut ctx = Context::new().with_store(&store);

        assert!(resolve(&mut ctx, Namespace::Identifier, "Mand", false).unwrap().value);
        assert!(resolve(&mut ctx, Namespace::Identifier, "Gone", true).unwrap().value);
        assert!(resolve(&mut ctx, Namespace::Reference, "ref_Dep", false).unwrap().value);
        assert!(!resolve(&mut ctx, Namespace::Identifier, "ref_Dep", false).unwrap().value);

        let prose = resolve(&mut ctx, Namespace::Identifier, "Prose", false).unwrap();
        assert_eq!(prose, ExpressionResult::new(true, Confidence::Possible));
    }

    #[test]
    fn test_second_visit_is_false_even_when_negated() {
        let store = MemoryStore::new()
            .with_identifier("A", ConformanceSet::from(Conformance::mandatory()));
        let mut ctx = Context::new().with_store(&store);
        assert!(resolve(&mut ctx, Namespace::Identifier, "A", false).unwrap().value);
        assert!(!resolve(&mut ctx, Namespace::Identifier, "A", true).unwrap().value);
    }

    #[test]
    fn test_self_reference_terminates() {
        let store = MemoryStore::new().with_identifier(
            "A",
            ConformanceSet::from(Conformance::mandatory_if(Expression::identifier("A"))),
        );
        let mut ctx = Context::new().with_store(&store);
        assert!(!resolve(&mut ctx, Namespace::Identifier, "A", false).unwrap().value);
    }
}
