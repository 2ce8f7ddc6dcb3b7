//! State for one compilation unit.

use std::sync::Arc;

use kite_codegen::FrameMap;
use kite_diagnostic::{Conflict, ConflictQueue, DiagnosticConfig, ErrorGuaranteed};
use kite_ir::{ClassifierKind, Decl, DeclArena, InternError, StringInterner};
use kite_resolve::{ScopeId, ScopeTree};

/// Knobs for a single unit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnitConfig {
    pub diagnostics: DiagnosticConfig,
}

/// What a finished unit hands back to the driver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitReport {
    /// Conflicts in report order.
    pub conflicts: Vec<Conflict>,
    /// Reports dropped by the error limit or deduplication.
    pub suppressed: usize,
    /// Present when at least one conflict was recorded.
    pub errors: Option<ErrorGuaranteed>,
}

impl UnitReport {
    /// `Err` when the unit recorded any conflict.
    pub fn result(&self) -> Result<(), ErrorGuaranteed> {
        self.errors.map_or(Ok(()), Err)
    }
}

/// One unit's declarations, scopes and frame.
///
/// Nothing here is shared with other units except the interner, so several
/// units can be processed on separate threads as long as each owns its own
/// `CompilationUnit`.
pub struct CompilationUnit {
    interner: Arc<StringInterner>,
    decls: DeclArena,
    scopes: ScopeTree<ConflictQueue>,
    frame: FrameMap,
    root: ScopeId,
}

impl CompilationUnit {
    /// Create a unit whose root scope is owned by a namespace named `package`.
    pub fn new(
        interner: Arc<StringInterner>,
        package: &str,
        config: UnitConfig,
    ) -> Result<Self, InternError> {
        let mut decls = DeclArena::new();
        let package_decl = decls.namespace(interner.try_intern(package)?);
        let mut scopes = ScopeTree::new(ConflictQueue::with_config(config.diagnostics));
        let root = scopes.root(package_decl);
        scopes.set_debug_name(root, package);
        tracing::debug!(package, ?root, "compilation unit created");
        Ok(CompilationUnit {
            interner,
            decls,
            scopes,
            frame: FrameMap::new(),
            root,
        })
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// The package-level scope.
    pub fn root(&self) -> ScopeId {
        self.root
    }

    pub fn decls(&self) -> &DeclArena {
        &self.decls
    }

    pub fn decls_mut(&mut self) -> &mut DeclArena {
        &mut self.decls
    }

    pub fn scopes(&self) -> &ScopeTree<ConflictQueue> {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeTree<ConflictQueue> {
        &mut self.scopes
    }

    pub fn frame(&self) -> &FrameMap {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameMap {
        &mut self.frame
    }

    // Declaration helpers: intern, allocate and bind in one step.

    pub fn declare_variable(&mut self, scope: ScopeId, name: &str) -> Result<Decl, InternError> {
        let decl = self.decls.variable(self.interner.try_intern(name)?);
        self.scopes.bind_variable(scope, decl);
        Ok(decl)
    }

    pub fn declare_property(&mut self, scope: ScopeId, name: &str) -> Result<Decl, InternError> {
        let decl = self.decls.property(self.interner.try_intern(name)?);
        self.scopes.bind_variable(scope, decl);
        Ok(decl)
    }

    pub fn declare_function(&mut self, scope: ScopeId, name: &str) -> Result<Decl, InternError> {
        let decl = self.decls.function(self.interner.try_intern(name)?);
        self.scopes.bind_function(scope, decl);
        Ok(decl)
    }

    /// Declare a classifier. Type parameters go through the same path.
    pub fn declare_classifier(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: ClassifierKind,
    ) -> Result<Decl, InternError> {
        let decl = self.decls.classifier(self.interner.try_intern(name)?, kind);
        if kind == ClassifierKind::TypeParameter {
            self.scopes.bind_type_parameter(scope, decl);
        } else {
            self.scopes.bind_classifier(scope, decl);
        }
        Ok(decl)
    }

    pub fn declare_namespace(&mut self, scope: ScopeId, name: &str) -> Result<Decl, InternError> {
        let decl = self.decls.namespace(self.interner.try_intern(name)?);
        self.scopes.bind_namespace(scope, decl);
        Ok(decl)
    }

    /// Open a nested scope owned by `owner`.
    pub fn enter_scope(&mut self, parent: ScopeId, owner: Decl) -> ScopeId {
        let scope = self.scopes.child(parent, owner);
        self.scopes
            .set_debug_name(scope, self.interner.lookup(owner.name()));
        scope
    }

    /// Collect the unit's diagnostics, consuming it.
    pub fn finish(self) -> UnitReport {
        let mut queue = self.scopes.into_sink();
        let suppressed = queue.suppressed();
        let errors = queue.has_errors();
        let conflicts = queue.flush();
        tracing::debug!(
            conflicts = conflicts.len(),
            suppressed,
            "compilation unit finished"
        );
        UnitReport {
            conflicts,
            suppressed,
            errors,
        }
    }
}
