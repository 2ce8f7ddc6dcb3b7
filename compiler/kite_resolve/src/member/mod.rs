//! Member scopes of receiver types.
//!
//! Inside a method body an unqualified name may refer to a member of the
//! implicit receiver. The scope chain does not know what a type is; it only
//! needs something that answers the three member lookups below.

use std::fmt;
use std::rc::Rc;

use kite_ir::{Decl, Name};
use rustc_hash::FxHashMap;

use crate::OverloadSet;

/// Lookup capability a receiver type exposes to the scope chain.
pub trait MemberScope: fmt::Debug {
    fn lookup_variable(&self, name: Name) -> Option<Decl>;

    /// Every member function named `name`; empty when there are none.
    fn lookup_overloads(&self, name: Name) -> OverloadSet;

    fn lookup_classifier(&self, name: Name) -> Option<Decl>;
}

/// Owned member table.
///
/// Built directly by a descriptor subsystem, or snapshotted from a class
/// body scope with [`ScopeTree::member_table`](crate::ScopeTree::member_table).
#[derive(Clone, Debug, Default)]
pub struct MemberTable {
    variables: FxHashMap<Name, Decl>,
    functions: FxHashMap<Name, OverloadSet>,
    classifiers: FxHashMap<Name, Decl>,
}

impl MemberTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable or property member. Replaces a same-named one.
    pub fn add_variable(&mut self, variable: Decl) {
        debug_assert!(variable.kind().is_variable());
        self.variables.insert(variable.name(), variable);
    }

    pub fn add_function(&mut self, function: Decl) {
        self.functions
            .entry(function.name())
            .or_insert_with(|| OverloadSet::new(function.name()))
            .add(function);
    }

    /// Add a nested classifier. Replaces a same-named one.
    pub fn add_classifier(&mut self, classifier: Decl) {
        debug_assert!(classifier.kind().is_classifier());
        self.classifiers.insert(classifier.name(), classifier);
    }

    /// Number of distinct member names across all three tables.
    pub fn len(&self) -> usize {
        self.variables.len() + self.functions.len() + self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemberScope for MemberTable {
    fn lookup_variable(&self, name: Name) -> Option<Decl> {
        self.variables.get(&name).copied()
    }

    fn lookup_overloads(&self, name: Name) -> OverloadSet {
        self.functions
            .get(&name)
            .cloned()
            .unwrap_or_else(|| OverloadSet::new(name))
    }

    fn lookup_classifier(&self, name: Name) -> Option<Decl> {
        self.classifiers.get(&name).copied()
    }
}

/// The implicit receiver of a scope: the classifier it is an instance of and
/// that classifier's member scope.
#[derive(Clone, Debug)]
pub struct ReceiverType {
    classifier: Decl,
    members: Rc<dyn MemberScope>,
}

impl ReceiverType {
    pub fn new(classifier: Decl, members: impl MemberScope + 'static) -> Self {
        ReceiverType {
            classifier,
            members: Rc::new(members),
        }
    }

    /// Share one member scope between several receivers (e.g. every method
    /// of a class).
    pub fn shared(classifier: Decl, members: Rc<dyn MemberScope>) -> Self {
        ReceiverType {
            classifier,
            members,
        }
    }

    pub fn classifier(&self) -> Decl {
        self.classifier
    }

    pub fn members(&self) -> &dyn MemberScope {
        &*self.members
    }
}
