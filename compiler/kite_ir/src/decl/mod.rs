//! Declaration entities.
//!
//! A [`Decl`] is a small `Copy` handle to a named program element produced by
//! semantic analysis. The resolver binds them to names and the code
//! generator assigns them frame slots; neither ever mutates one.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::Name;

/// Stable identity of a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DeclId(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Flavor of a classifier declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassifierKind {
    Class,
    Interface,
    /// Singleton object declaration.
    Object,
    /// Generic type parameter.
    TypeParameter,
}

/// Variant of a declaration entity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    /// Local variable or value parameter.
    Variable,
    /// Member property; a variable with an optional backing field.
    Property,
    Function,
    Classifier(ClassifierKind),
    Namespace,
}

impl DeclKind {
    /// Variables and properties share the variable lookup path.
    #[inline]
    pub fn is_variable(self) -> bool {
        matches!(self, DeclKind::Variable | DeclKind::Property)
    }

    #[inline]
    pub fn is_function(self) -> bool {
        matches!(self, DeclKind::Function)
    }

    #[inline]
    pub fn is_classifier(self) -> bool {
        matches!(self, DeclKind::Classifier(_))
    }

    #[inline]
    pub fn is_namespace(self) -> bool {
        matches!(self, DeclKind::Namespace)
    }
}

/// A declaration entity.
///
/// Equality and hashing use [`DeclId`] only: two different declarations
/// named `x` are distinct, and the same declaration is always equal to
/// itself no matter where it was copied.
#[derive(Copy, Clone)]
pub struct Decl {
    id: DeclId,
    name: Name,
    kind: DeclKind,
}

impl Decl {
    /// Create a declaration handle.
    ///
    /// Normally called by [`DeclArena::alloc`]; exposed for descriptor
    /// subsystems that manage identities themselves.
    #[inline]
    pub const fn new(id: DeclId, name: Name, kind: DeclKind) -> Self {
        Decl { id, name, kind }
    }

    #[inline]
    pub fn id(self) -> DeclId {
        self.id
    }

    #[inline]
    pub fn name(self) -> Name {
        self.name
    }

    #[inline]
    pub fn kind(self) -> DeclKind {
        self.kind
    }

    /// Synthetic declarations have no source name.
    #[inline]
    pub fn is_anonymous(self) -> bool {
        self.name.is_empty()
    }

    /// Whether an unqualified `this` inside this declaration refers to the
    /// declaration itself.
    ///
    /// Classes, interfaces and objects introduce a receiver; type parameters
    /// and everything else defer to their container.
    pub fn defines_own_this(self) -> bool {
        matches!(
            self.kind,
            DeclKind::Classifier(
                ClassifierKind::Class | ClassifierKind::Interface | ClassifierKind::Object
            )
        )
    }
}

impl PartialEq for Decl {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Decl {}

impl Hash for Decl {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decl#{}({:?} {:?})", self.id.0, self.kind, self.name)
    }
}

/// Allocator of declaration identities.
///
/// Stands in for the descriptor-construction subsystem: it owns the
/// canonical copy of every declaration of one compilation unit.
#[derive(Default, Debug)]
pub struct DeclArena {
    decls: Vec<Decl>,
}

impl DeclArena {
    pub fn new() -> Self {
        DeclArena { decls: Vec::new() }
    }

    /// Allocate a fresh declaration.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` declarations are allocated.
    pub fn alloc(&mut self, name: Name, kind: DeclKind) -> Decl {
        let raw = u32::try_from(self.decls.len())
            .unwrap_or_else(|_| panic!("declaration arena exceeded u32::MAX entries"));
        let decl = Decl::new(DeclId(raw), name, kind);
        self.decls.push(decl);
        decl
    }

    pub fn variable(&mut self, name: Name) -> Decl {
        self.alloc(name, DeclKind::Variable)
    }

    pub fn property(&mut self, name: Name) -> Decl {
        self.alloc(name, DeclKind::Property)
    }

    pub fn function(&mut self, name: Name) -> Decl {
        self.alloc(name, DeclKind::Function)
    }

    pub fn classifier(&mut self, name: Name, kind: ClassifierKind) -> Decl {
        self.alloc(name, DeclKind::Classifier(kind))
    }

    pub fn namespace(&mut self, name: Name) -> Decl {
        self.alloc(name, DeclKind::Namespace)
    }

    /// Look up a declaration by identity.
    pub fn get(&self, id: DeclId) -> Option<Decl> {
        self.decls.get(id.0 as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Iterate declarations in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = Decl> + '_ {
        self.decls.iter().copied()
    }
}

#[cfg(test)]
mod tests;
