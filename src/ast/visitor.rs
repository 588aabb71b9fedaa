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

//! Visitor pattern for AST traversal

use super::conformance::{Conformance, ConformanceSet};
use super::expression::Expression;
use super::value::ComparisonValue;

/// Trait for visiting AST nodes
///
/// Leaf callbacks default to no-ops, so implementors only override what they
/// care about.
pub trait Visitor {
    /// Visit an expression node
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr)
    }

    /// Visit a comparison operand
    fn visit_value(&mut self, value: &ComparisonValue) {
        walk_value(self, value)
    }

    /// Visit an identifier or feature name
    fn visit_identifier(&mut self, _id: &str, _not: bool) {}

    /// Visit a cross-reference
    fn visit_reference(&mut self, _id: &str, _label: Option<&str>, _not: bool) {}
}

/// Default implementation of walking an expression tree
pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Identifier { id, not } | Expression::Feature { id, not } => {
            visitor.visit_identifier(id, *not)
        }
        Expression::Reference { id, label, not } => {
            visitor.visit_reference(id, label.as_deref(), *not)
        }
        Expression::Equality(data) => {
            visitor.visit_expression(&data.left);
            visitor.visit_expression(&data.right);
        }
        Expression::Logical(data) => {
            visitor.visit_expression(&data.left);
            for right in &data.right {
                visitor.visit_expression(right);
            }
        }
        Expression::Comparison(data) => {
            visitor.visit_value(&data.left);
            visitor.visit_value(&data.right);
        }
        Expression::Revision { .. } | Expression::RevisionRange(_) => {}
    }
}

/// Default implementation of walking a comparison operand
pub fn walk_value<V: Visitor + ?Sized>(visitor: &mut V, value: &ComparisonValue) {
    match value {
        ComparisonValue::Identifier { id } => visitor.visit_identifier(id, false),
        ComparisonValue::Math(op) => {
            visitor.visit_value(&op.left);
            visitor.visit_value(&op.right);
        }
        _ => {}
    }
}

/// Walk every guarding expression of a conformance set
pub fn walk_set<V: Visitor + ?Sized>(visitor: &mut V, set: &ConformanceSet) {
    for conformance in set {
        if let Some(expr) = conformance.expression() {
            visitor.visit_expression(expr);
        }
    }
}

/// Collects every name an expression tree refers to, in first-seen order
#[derive(Debug, Default)]
pub struct NameCollector {
    names: Vec<String>,
}

impl NameCollector {
    fn add(&mut self, name: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    /// Consume the collector
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

impl Visitor for NameCollector {
    fn visit_identifier(&mut self, id: &str, _not: bool) {
        self.add(id);
    }

    fn visit_reference(&mut self, id: &str, _label: Option<&str>, _not: bool) {
        self.add(id);
    }
}

impl Expression {
    /// Names of identifiers, features, references and context values used
    pub fn names(&self) -> Vec<String> {
        let mut collector = NameCollector::default();
        collector.visit_expression(self);
        collector.into_names()
    }
}

impl ConformanceSet {
    /// Names referred to by any member's guarding expression
    pub fn names(&self) -> Vec<String> {
        let mut collector = NameCollector::default();
        walk_set(&mut collector, self);
        collector.into_names()
    }

    /// Check if any member's expression refers to `name`
    pub fn mentions(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }
}

impl Conformance {
    /// Names referred to by the guarding expression
    pub fn names(&self) -> Vec<String> {
        self.expression().map(Expression::names).unwrap_or_default()
    }
}
