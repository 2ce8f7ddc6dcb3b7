//! Name resolution for the Kite compiler.
//!
//! This crate provides:
//!
//! - **Scope chain** ([`ScopeTree`], [`ScopeId`]): lexical binding regions
//!   with a parent, an optional delegate ("worker") scope, imports and an
//!   optional receiver type. Redeclarations are reported to a
//!   [`DiagnosticSink`](kite_diagnostic::DiagnosticSink) and overwrite.
//!
//! - **Overload sets** ([`OverloadSet`]): same-named functions accumulated
//!   per scope and merged across every scope that contributes candidates.
//!
//! - **Member scopes** ([`MemberScope`], [`MemberTable`], [`ReceiverType`]):
//!   the capability a receiver type exposes for implicit-`this` lookups.
//!
//! # Crate Dependencies
//!
//! `kite_resolve` depends on `kite_ir` (for `Name` and `Decl`) and
//! `kite_diagnostic` (for the sink). It never parses or type-checks; it only
//! binds entities somebody else constructed.

mod error;
pub mod member;
pub mod overload;
pub mod scope;
mod stack;

pub use error::ScopeError;
pub use member::{MemberScope, MemberTable, ReceiverType};
pub use overload::OverloadSet;
pub use scope::{ScopeId, ScopeTree};
