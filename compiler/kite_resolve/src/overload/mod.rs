//! Overload sets.
//!
//! Functions do not compete for a name the way variables do: every
//! same-named function visible at a lookup point is a candidate. An
//! [`OverloadSet`] collects them; picking the best one is left to the
//! type checker.

use kite_ir::{Decl, Name};
use smallvec::SmallVec;

/// Same-named function entities, in first-seen order, without duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverloadSet {
    name: Name,
    functions: SmallVec<[Decl; 4]>,
}

impl OverloadSet {
    /// Create an empty set for `name`.
    pub fn new(name: Name) -> Self {
        OverloadSet {
            name,
            functions: SmallVec::new(),
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    /// Add a function. Returns `false` if it was already a member.
    pub fn add(&mut self, function: Decl) -> bool {
        debug_assert!(
            function.kind().is_function(),
            "overload sets only hold functions, got {function:?}"
        );
        if self.contains(function) {
            return false;
        }
        self.functions.push(function);
        true
    }

    /// Union `other` into this set. Never fails and never reports.
    pub fn merge(&mut self, other: &OverloadSet) {
        for &function in &other.functions {
            self.add(function);
        }
    }

    pub fn contains(&self, function: Decl) -> bool {
        self.functions.contains(&function)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn as_slice(&self) -> &[Decl] {
        &self.functions
    }

    pub fn iter(&self) -> impl Iterator<Item = Decl> + '_ {
        self.functions.iter().copied()
    }
}

impl<'a> IntoIterator for &'a OverloadSet {
    type Item = &'a Decl;
    type IntoIter = std::slice::Iter<'a, Decl>;

    fn into_iter(self) -> Self::IntoIter {
        self.functions.iter()
    }
}
