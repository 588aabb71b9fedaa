//! Derived queries over conformance sets
//!
//! The `is_*` predicates are structural and look at the first member only.
//! [`is_zigbee_only`] evaluates.

use super::context::{Context, ZIGBEE};
use super::error::EvaluationResult;
use crate::ast::{Conformance, ConformanceSet};
use crate::model::{EntityStore, State};

impl ConformanceSet {
    /// The first member is an unconditional `M`
    pub fn is_mandatory(&self) -> bool {
        matches!(self.first(), Some(Conformance::Mandatory { expression: None }))
    }

    /// The first member is an unconditional `O`
    pub fn is_optional(&self) -> bool {
        matches!(
            self.first(),
            Some(Conformance::Optional {
                expression: None,
                ..
            })
        )
    }

    /// The first member is `P`
    pub fn is_provisional(&self) -> bool {
        matches!(self.first(), Some(Conformance::Provisional))
    }

    /// The first member is `D`
    pub fn is_deprecated(&self) -> bool {
        matches!(self.first(), Some(Conformance::Deprecated))
    }

    /// The first member is `X`
    pub fn is_disallowed(&self) -> bool {
        matches!(self.first(), Some(Conformance::Disallowed))
    }

    /// The set has no members
    pub fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Check if an element exists only on Zigbee.
///
/// True when the set is disallowed with nothing bound but not disallowed
/// once `Zigbee` is bound to `true`. Both evaluations use the same store.
pub fn is_zigbee_only(
    store: Option<&dyn EntityStore>,
    set: &ConformanceSet,
) -> EvaluationResult<bool> {
    let context = || {
        let ctx = Context::new();
        match store {
            Some(store) => ctx.with_store(store),
            None => ctx,
        }
    };

    let without = set.eval(&mut context())?;
    if without.state != State::Disallowed {
        return Ok(false);
    }
    let with = set.eval(&mut context().with_value(ZIGBEE, true))?;
    Ok(with.state != State::Disallowed)
}
