//! The scope chain.
//!
//! Every lexical construct the analyzer enters (file, class body, function
//! body, block) gets a node in a [`ScopeTree`]. A node owns four binding
//! tables and links to up to three kinds of other scopes:
//!
//! - its **parent**, the enclosing lexical scope;
//! - an optional **delegate** ("worker") scope, visible without nesting and
//!   consulted before the parent;
//! - zero or more **imports**, whose bindings appear merged in for
//!   aggregate views, labels and classifiers.
//!
//! # Redeclaration
//!
//! Variables, classifiers and namespaces share one keyspace. Binding a name
//! that is already taken reports [`ConflictKind::Redeclaration`] to the
//! tree's sink and then overwrites: the newest declaration always wins and
//! analysis carries on.
//!
//! # Lookup order
//!
//! Single-valued lookups try, in order, the local table, the receiver type's
//! members, the delegate and the parent, and stop at the first hit. Overload
//! lookup visits the same stages but unions what each contributes. See
//! `lookup.rs`.
//!
//! # Aggregate view
//!
//! [`ScopeTree::all_visible_entities`] is computed once per node and then
//! frozen. Bindings added afterwards are not reflected in it.

use std::cell::OnceCell;

use kite_diagnostic::{ConflictKind, ConflictQueue, DiagnosticSink};
use kite_ir::{Decl, Name};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::{MemberTable, OverloadSet, ReceiverType, ScopeError};

mod lookup;

/// Handle to a node in a [`ScopeTree`].
///
/// Only meaningful for the tree that created it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One lexical binding region.
#[derive(Debug)]
struct ScopeNode {
    owner: Decl,
    parent: Option<ScopeId>,
    delegate: Option<ScopeId>,
    imports: Vec<ScopeId>,
    receiver: Option<ReceiverType>,
    debug_name: Option<String>,

    /// Variables, classifiers and namespaces; one declaration per name.
    names: FxHashMap<Name, Decl>,
    functions: FxHashMap<Name, OverloadSet>,
    /// Properties keyed by backing-field name.
    fields: FxHashMap<Name, Decl>,
    labels: FxHashMap<Name, SmallVec<[Decl; 1]>>,
    /// Classifier aliases brought in by imports. Local declarations shadow
    /// these.
    import_aliases: FxHashMap<Name, Decl>,

    /// Every bound variable in binding order, including overwritten ones.
    declared_variables: Vec<Decl>,
    /// Every entity bound here, deduplicated, in binding order.
    declared: Vec<Decl>,
    declared_set: FxHashSet<Decl>,

    all_visible: OnceCell<Box<[Decl]>>,
}

impl ScopeNode {
    fn new(owner: Decl, parent: Option<ScopeId>, delegate: Option<ScopeId>) -> Self {
        ScopeNode {
            owner,
            parent,
            delegate,
            imports: Vec::new(),
            receiver: None,
            debug_name: None,
            names: FxHashMap::default(),
            functions: FxHashMap::default(),
            fields: FxHashMap::default(),
            labels: FxHashMap::default(),
            import_aliases: FxHashMap::default(),
            declared_variables: Vec::new(),
            declared: Vec::new(),
            declared_set: FxHashSet::default(),
            all_visible: OnceCell::new(),
        }
    }

    fn accumulate(&mut self, decl: Decl) {
        if self.declared_set.insert(decl) {
            self.declared.push(decl);
        }
    }
}

/// Arena of scope nodes for one compilation unit.
///
/// The tree owns the [`DiagnosticSink`] every binding reports into. Pass a
/// `&mut` sink to keep ownership outside, or let the tree own a
/// [`ConflictQueue`] and take it back with [`into_sink`](Self::into_sink).
///
/// Nodes can only link to scopes that already exist, so parent and delegate
/// chains are acyclic by construction. The import graph must be kept acyclic
/// by the caller.
#[derive(Debug)]
pub struct ScopeTree<S: DiagnosticSink = ConflictQueue> {
    nodes: Vec<ScopeNode>,
    sink: S,
}

impl Default for ScopeTree<ConflictQueue> {
    fn default() -> Self {
        Self::new(ConflictQueue::new())
    }
}

impl<S: DiagnosticSink> ScopeTree<S> {
    /// Create an empty tree reporting into `sink`.
    pub fn new(sink: S) -> Self {
        ScopeTree {
            nodes: Vec::new(),
            sink,
        }
    }

    /// Create a scope with explicit links.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` scopes are created.
    pub fn scope(
        &mut self,
        parent: Option<ScopeId>,
        delegate: Option<ScopeId>,
        owner: Decl,
    ) -> ScopeId {
        debug_assert!(parent.map_or(true, |p| p.index() < self.nodes.len()));
        debug_assert!(delegate.map_or(true, |d| d.index() < self.nodes.len()));
        let raw = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("scope tree exceeded u32::MAX scopes"));
        self.nodes.push(ScopeNode::new(owner, parent, delegate));
        ScopeId(raw)
    }

    /// Create a scope with no parent and no delegate.
    pub fn root(&mut self, owner: Decl) -> ScopeId {
        self.scope(None, None, owner)
    }

    /// Create a nested scope.
    pub fn child(&mut self, parent: ScopeId, owner: Decl) -> ScopeId {
        self.scope(Some(parent), None, owner)
    }

    /// Create a nested scope that also sees `delegate` before `parent`.
    pub fn child_with_delegate(
        &mut self,
        parent: ScopeId,
        delegate: ScopeId,
        owner: Decl,
    ) -> ScopeId {
        self.scope(Some(parent), Some(delegate), owner)
    }

    /// Attach a human-readable name used in trace output.
    pub fn set_debug_name(&mut self, scope: ScopeId, name: impl Into<String>) {
        self.node_mut(scope).debug_name = Some(name.into());
    }

    /// Number of scopes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    #[inline]
    fn node(&self, scope: ScopeId) -> &ScopeNode {
        &self.nodes[scope.index()]
    }

    #[inline]
    fn node_mut(&mut self, scope: ScopeId) -> &mut ScopeNode {
        &mut self.nodes[scope.index()]
    }

    // Binding

    /// Report a redeclaration if `name` is taken, then store `decl` under it.
    fn bind_shared(&mut self, scope: ScopeId, name: Name, decl: Decl) {
        let node = &mut self.nodes[scope.index()];
        if node.all_visible.get().is_some() {
            tracing::trace!(?scope, ?decl, "binding after aggregate view was frozen");
        }
        if let Some(existing) = node.names.insert(name, decl) {
            tracing::debug!(?scope, ?existing, new = ?decl, "redeclaration");
            self.sink
                .report(ConflictKind::Redeclaration, existing, decl);
        }
        node.accumulate(decl);
    }

    /// Bind a variable or property under its own name.
    pub fn bind_variable(&mut self, scope: ScopeId, variable: Decl) {
        debug_assert!(variable.kind().is_variable());
        self.bind_shared(scope, variable.name(), variable);
        self.node_mut(scope).declared_variables.push(variable);
    }

    /// Add a function to the overload set for its name. Never reports.
    pub fn bind_function(&mut self, scope: ScopeId, function: Decl) {
        let node = self.node_mut(scope);
        node.functions
            .entry(function.name())
            .or_insert_with(|| OverloadSet::new(function.name()))
            .add(function);
        node.accumulate(function);
    }

    /// Bind a classifier under `name`, which may differ from its own name.
    pub fn bind_classifier_alias(&mut self, scope: ScopeId, name: Name, classifier: Decl) {
        debug_assert!(classifier.kind().is_classifier());
        self.bind_shared(scope, name, classifier);
    }

    /// Bind a class, interface or object under its own name.
    pub fn bind_classifier(&mut self, scope: ScopeId, classifier: Decl) {
        self.bind_classifier_alias(scope, classifier.name(), classifier);
    }

    /// Bind a type parameter under its own name.
    pub fn bind_type_parameter(&mut self, scope: ScopeId, type_parameter: Decl) {
        self.bind_classifier_alias(scope, type_parameter.name(), type_parameter);
    }

    pub fn bind_namespace(&mut self, scope: ScopeId, namespace: Decl) {
        debug_assert!(namespace.kind().is_namespace());
        self.bind_shared(scope, namespace.name(), namespace);
    }

    /// Map a backing-field name to its property. Overwrites silently.
    pub fn bind_property_by_field_name(&mut self, scope: ScopeId, field_name: Name, property: Decl) {
        self.node_mut(scope).fields.insert(field_name, property);
    }

    /// Add a labeled declaration. A label may name several declarations.
    pub fn bind_label(&mut self, scope: ScopeId, labeled: Decl) {
        self.node_mut(scope)
            .labels
            .entry(labeled.name())
            .or_default()
            .push(labeled);
    }

    /// Set the implicit receiver of `scope`.
    ///
    /// A scope has at most one receiver; a second call fails and leaves the
    /// first in place.
    pub fn set_receiver_type(
        &mut self,
        scope: ScopeId,
        receiver: ReceiverType,
    ) -> Result<(), ScopeError> {
        let node = self.node_mut(scope);
        if let Some(existing) = &node.receiver {
            let err = ScopeError::ReceiverAlreadySet {
                scope,
                owner: node.owner,
                existing: existing.classifier(),
            };
            tracing::debug!(%err, "receiver redeclared");
            return Err(err);
        }
        node.receiver = Some(receiver);
        Ok(())
    }

    /// Make the bindings of `imported` visible in `scope`.
    pub fn add_import(&mut self, scope: ScopeId, imported: ScopeId) {
        debug_assert_ne!(scope, imported, "a scope cannot import itself");
        self.node_mut(scope).imports.push(imported);
    }

    /// Bring a classifier into `scope` under `name` through an import.
    ///
    /// The classifier is mirrored into this scope's aggregate view right
    /// away. A second import of the same alias reports and overwrites.
    pub fn import_classifier_alias(&mut self, scope: ScopeId, name: Name, classifier: Decl) {
        debug_assert!(classifier.kind().is_classifier());
        let node = &mut self.nodes[scope.index()];
        node.accumulate(classifier);
        if let Some(existing) = node.import_aliases.insert(name, classifier) {
            tracing::debug!(?scope, ?existing, new = ?classifier, "import alias redeclared");
            self.sink
                .report(ConflictKind::Redeclaration, existing, classifier);
        }
    }

    // Introspection

    pub fn owner(&self, scope: ScopeId) -> Decl {
        self.node(scope).owner
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.node(scope).parent
    }

    pub fn delegate(&self, scope: ScopeId) -> Option<ScopeId> {
        self.node(scope).delegate
    }

    pub fn imports(&self, scope: ScopeId) -> &[ScopeId] {
        &self.node(scope).imports
    }

    pub fn debug_name(&self, scope: ScopeId) -> Option<&str> {
        self.node(scope).debug_name.as_deref()
    }

    /// Variables bound directly in `scope`, in binding order.
    pub fn declared_variables(&self, scope: ScopeId) -> &[Decl] {
        &self.node(scope).declared_variables
    }

    /// Whether anything was bound in the shared keyspace of `scope`.
    pub fn has_declared_items(&self, scope: ScopeId) -> bool {
        !self.node(scope).names.is_empty()
    }

    /// Snapshot the local variables, functions and classifiers of `scope`.
    ///
    /// Lets a class body scope act as the member scope of the class's
    /// receiver type inside its methods.
    pub fn member_table(&self, scope: ScopeId) -> MemberTable {
        let node = self.node(scope);
        let mut table = MemberTable::new();
        for &decl in node.names.values() {
            if decl.kind().is_variable() {
                table.add_variable(decl);
            } else if decl.kind().is_classifier() {
                table.add_classifier(decl);
            }
        }
        for set in node.functions.values() {
            for function in set {
                table.add_function(*function);
            }
        }
        table
    }
}
