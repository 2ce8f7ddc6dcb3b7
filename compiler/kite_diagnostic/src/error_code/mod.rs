//! Error codes for resolver diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for resolver diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E2xxx: Name resolution errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Name already declared in this scope
    E2001,
    /// Receiver type set twice on one scope
    E9001,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "name already declared in this scope",
            ErrorCode::E9001 => "receiver type redeclared on a scope",
        }
    }

    /// Check if this is an internal compiler error.
    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
