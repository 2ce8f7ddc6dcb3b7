//! Protocol misuse errors.

use kite_diagnostic::ErrorCode;
use kite_ir::Decl;

use crate::ScopeId;

/// A scope was used in a way its callers promised never to.
///
/// Unlike redeclarations, these abort the current analysis step.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScopeError {
    /// `set_receiver_type` called on a scope that already has one.
    #[error("receiver type already set on {scope:?} (owner {owner:?}, receiver {existing:?})")]
    ReceiverAlreadySet {
        scope: ScopeId,
        owner: Decl,
        existing: Decl,
    },
}

impl ScopeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScopeError::ReceiverAlreadySet { .. } => ErrorCode::E9001,
        }
    }
}
