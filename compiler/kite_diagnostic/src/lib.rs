//! Conflict reporting for name resolution.
//!
//! The resolver never formats messages. It reports *what* collided through
//! the [`DiagnosticSink`] trait and carries on; turning a [`Conflict`] into
//! text is the job of whoever owns the sink.
//!
//! # Error Guarantees
//!
//! The `ErrorGuaranteed` type provides type-level proof that at least one
//! error was recorded.
//!
//! ```text
//! let guarantee = queue.has_errors();
//! fn analyze() -> Result<Module, ErrorGuaranteed> { ... }
//! ```

mod conflict;
mod error_code;
mod guarantee;
pub mod queue;

pub use conflict::{Conflict, ConflictKind, DiagnosticSink};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{ConflictQueue, DiagnosticConfig};
