//! Lookups over the scope chain.
//!
//! Precedence for single-valued lookups is local table, receiver members,
//! delegate, parent. Imports only take part in classifier and label lookups
//! and in the aggregate view.

use kite_diagnostic::DiagnosticSink;
use kite_ir::{Decl, Name};
use rustc_hash::FxHashSet;

use super::{ScopeId, ScopeNode, ScopeTree};
use crate::stack::ensure_sufficient_stack;
use crate::{OverloadSet, ReceiverType};

impl<S: DiagnosticSink> ScopeTree<S> {
    /// Find the variable or property visible as `name`.
    ///
    /// Imports are not consulted.
    pub fn lookup_variable(&self, scope: ScopeId, name: Name) -> Option<Decl> {
        ensure_sufficient_stack(|| {
            let node = self.node(scope);
            if let Some(&decl) = node.names.get(&name) {
                if decl.kind().is_variable() {
                    return Some(decl);
                }
            }
            if let Some(found) = node
                .receiver
                .as_ref()
                .and_then(|r| r.members().lookup_variable(name))
            {
                return Some(found);
            }
            if let Some(found) = node.delegate.and_then(|d| self.lookup_variable(d, name)) {
                return Some(found);
            }
            node.parent.and_then(|p| self.lookup_variable(p, name))
        })
    }

    /// Every function named `name` visible from `scope`.
    ///
    /// Unlike the other lookups this never stops early: local functions,
    /// receiver members, the delegate's and the parent's candidates are all
    /// merged, in that order.
    pub fn lookup_overloads(&self, scope: ScopeId, name: Name) -> OverloadSet {
        let mut result = OverloadSet::new(name);
        self.collect_overloads(scope, name, &mut result);
        result
    }

    fn collect_overloads(&self, scope: ScopeId, name: Name, out: &mut OverloadSet) {
        ensure_sufficient_stack(|| {
            let node = self.node(scope);
            if let Some(local) = node.functions.get(&name) {
                out.merge(local);
            }
            if let Some(receiver) = &node.receiver {
                out.merge(&receiver.members().lookup_overloads(name));
            }
            if let Some(delegate) = node.delegate {
                self.collect_overloads(delegate, name, out);
            }
            if let Some(parent) = node.parent {
                self.collect_overloads(parent, name, out);
            }
        });
    }

    /// Find the classifier visible as `name`.
    ///
    /// Order: local declarations, delegate, import aliases, each import,
    /// parent.
    pub fn lookup_classifier(&self, scope: ScopeId, name: Name) -> Option<Decl> {
        ensure_sufficient_stack(|| {
            let node = self.node(scope);
            if let Some(&decl) = node.names.get(&name) {
                if decl.kind().is_classifier() {
                    return Some(decl);
                }
            }
            if let Some(found) = node.delegate.and_then(|d| self.lookup_classifier(d, name)) {
                return Some(found);
            }
            if let Some(&alias) = node.import_aliases.get(&name) {
                return Some(alias);
            }
            if let Some(found) = node
                .imports
                .iter()
                .find_map(|&imported| self.lookup_classifier(imported, name))
            {
                return Some(found);
            }
            node.parent.and_then(|p| self.lookup_classifier(p, name))
        })
    }

    /// The namespace declared directly in `scope` as `name`, if any.
    pub fn declared_namespace(&self, scope: ScopeId, name: Name) -> Option<Decl> {
        self.node(scope)
            .names
            .get(&name)
            .copied()
            .filter(|decl| decl.kind().is_namespace())
    }

    pub fn lookup_namespace(&self, scope: ScopeId, name: Name) -> Option<Decl> {
        ensure_sufficient_stack(|| {
            if let Some(found) = self.declared_namespace(scope, name) {
                return Some(found);
            }
            let node = self.node(scope);
            if let Some(found) = node.delegate.and_then(|d| self.lookup_namespace(d, name)) {
                return Some(found);
            }
            node.parent.and_then(|p| self.lookup_namespace(p, name))
        })
    }

    /// Find the property whose backing field is `field_name`.
    pub fn lookup_property_by_field_name(&self, scope: ScopeId, field_name: Name) -> Option<Decl> {
        ensure_sufficient_stack(|| {
            let node = self.node(scope);
            if let Some(&property) = node.fields.get(&field_name) {
                return Some(property);
            }
            node.parent
                .and_then(|p| self.lookup_property_by_field_name(p, field_name))
        })
    }

    /// All declarations labeled `name`, nearest scope first.
    ///
    /// Local entries come first, then entries of each import, then whatever
    /// the parent chain returns.
    pub fn lookup_label(&self, scope: ScopeId, name: Name) -> Vec<Decl> {
        ensure_sufficient_stack(|| {
            let node = self.node(scope);
            let outer = node
                .parent
                .map(|p| self.lookup_label(p, name))
                .unwrap_or_default();

            let mut result: Vec<Decl> = node
                .labels
                .get(&name)
                .into_iter()
                .flatten()
                .copied()
                .collect();
            for &imported in &node.imports {
                if let Some(labeled) = self.node(imported).labels.get(&name) {
                    result.extend(labeled.iter().copied());
                }
            }

            if result.is_empty() {
                return outer;
            }
            result.extend(outer);
            result
        })
    }

    /// The receiver type in effect at `scope`: its own, else the nearest
    /// ancestor's.
    pub fn receiver_type(&self, scope: ScopeId) -> Option<&ReceiverType> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let node = self.node(id);
            if let Some(receiver) = &node.receiver {
                return Some(receiver);
            }
            current = node.parent;
        }
        None
    }

    /// The declaration an unqualified `this` refers to at `scope`.
    ///
    /// The owner if it defines its own receiver (a class, interface or
    /// object), otherwise the answer of the delegate, then of the parent.
    pub fn unqualified_this_owner(&self, scope: ScopeId) -> Option<Decl> {
        ensure_sufficient_stack(|| {
            let node = self.node(scope);
            if node.owner.defines_own_this() {
                return Some(node.owner);
            }
            node.delegate
                .and_then(|d| self.unqualified_this_owner(d))
                .or_else(|| node.parent.and_then(|p| self.unqualified_this_owner(p)))
        })
    }

    /// Every entity visible at `scope`: local bindings, then the delegate's
    /// view, then each import's view, without duplicates.
    ///
    /// Computed on first call and frozen. Later bindings in `scope` do not
    /// show up here.
    pub fn all_visible_entities(&self, scope: ScopeId) -> &[Decl] {
        let node = self.node(scope);
        node.all_visible
            .get_or_init(|| ensure_sufficient_stack(|| self.compute_all_visible(scope, node)))
    }

    #[tracing::instrument(level = "trace", skip(self, node), fields(name = node.debug_name.as_deref()))]
    fn compute_all_visible(&self, scope: ScopeId, node: &ScopeNode) -> Box<[Decl]> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::with_capacity(node.declared.len());
        let mut push = |decl: Decl| {
            if seen.insert(decl) {
                result.push(decl);
            }
        };

        node.declared.iter().copied().for_each(&mut push);
        if let Some(delegate) = node.delegate {
            self.all_visible_entities(delegate)
                .iter()
                .copied()
                .for_each(&mut push);
        }
        for &imported in &node.imports {
            self.all_visible_entities(imported)
                .iter()
                .copied()
                .for_each(&mut push);
        }

        tracing::trace!(count = result.len(), "aggregate view frozen");
        result.into_boxed_slice()
    }
}
