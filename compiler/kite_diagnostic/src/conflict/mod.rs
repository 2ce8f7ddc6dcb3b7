//! Conflict records and the sink contract the resolver reports into.

use kite_ir::Decl;

use crate::ErrorCode;

/// What kind of collision a binding operation ran into.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConflictKind {
    /// A name in the shared variable/classifier/namespace keyspace (or an
    /// imported classifier alias) was bound again in the same scope.
    Redeclaration,
}

impl ConflictKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ConflictKind::Redeclaration => ErrorCode::E2001,
        }
    }
}

/// One reported conflict: the entity that held the name and the entity that
/// replaced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub existing: Decl,
    pub new: Decl,
}

impl Conflict {
    pub fn new(kind: ConflictKind, existing: Decl, new: Decl) -> Self {
        Conflict {
            kind,
            existing,
            new,
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

/// Receiver of resolver conflicts.
///
/// Fire-and-forget: the resolver neither inspects a return value nor waits.
pub trait DiagnosticSink {
    fn report(&mut self, kind: ConflictKind, existing: Decl, new: Decl);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    #[inline]
    fn report(&mut self, kind: ConflictKind, existing: Decl, new: Decl) {
        (**self).report(kind, existing, new);
    }
}

impl DiagnosticSink for Vec<Conflict> {
    fn report(&mut self, kind: ConflictKind, existing: Decl, new: Decl) {
        self.push(Conflict::new(kind, existing, new));
    }
}
