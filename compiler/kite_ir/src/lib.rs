//! Kite IR - shared identifiers and declaration entities.
//!
//! This crate contains the data that both the resolver and the code
//! generator consume but never construct on their own:
//! - Names for interned identifiers
//! - Declaration entities (`Decl`) and the arena that hands them out
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), declarations → DeclId(u32)
//! - **Identity, not structure**: two declarations compare equal only when
//!   they are the same declaration, never because they share a name

mod decl;
mod interner;
mod name;

pub use decl::{ClassifierKind, Decl, DeclArena, DeclId, DeclKind};
pub use interner::{InternError, StringInterner};
pub use name::Name;
