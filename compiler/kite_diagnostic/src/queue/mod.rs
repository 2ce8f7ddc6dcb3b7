//! Conflict queue for collecting resolver diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of identical back-to-back reports
//! - `ErrorGuaranteed` proof that errors were recorded

use kite_ir::Decl;

use crate::{Conflict, ConflictKind, DiagnosticSink, ErrorGuaranteed};

/// Configuration for conflict collection.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of conflicts kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a report identical to the one immediately before it.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config that stops recording after `limit` conflicts.
    pub fn strict(limit: usize) -> Self {
        DiagnosticConfig {
            error_limit: limit,
            deduplicate: true,
        }
    }

    /// Create a config that keeps every report (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Collecting [`DiagnosticSink`].
///
/// # Example
///
/// ```text
/// let mut queue = ConflictQueue::new();
/// let mut scopes = ScopeTree::new(&mut queue);
/// // ... bind declarations
/// let conflicts = queue.flush();
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConflictQueue {
    conflicts: Vec<Conflict>,
    /// Reports dropped by the limit or by deduplication.
    suppressed: usize,
    config: DiagnosticConfig,
}

impl ConflictQueue {
    /// Create a new queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        ConflictQueue {
            conflicts: Vec::new(),
            suppressed: 0,
            config,
        }
    }

    /// Add a conflict.
    ///
    /// Returns `true` if the conflict was kept, `false` if it was filtered.
    pub fn add(&mut self, conflict: Conflict) -> bool {
        if self.limit_reached() {
            self.suppressed += 1;
            return false;
        }

        if self.config.deduplicate && self.conflicts.last() == Some(&conflict) {
            self.suppressed += 1;
            return false;
        }

        tracing::trace!(
            code = %conflict.code(),
            existing = ?conflict.existing,
            new = ?conflict.new,
            "conflict recorded"
        );
        self.conflicts.push(conflict);
        true
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.conflicts.len() >= self.config.error_limit
    }

    /// Number of conflicts kept.
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of reports filtered out.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Check if any errors were recorded and get proof if so.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.conflicts.len())
    }

    /// Get conflicts without clearing the queue.
    pub fn peek(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Return the conflicts in report order and reset the queue.
    pub fn flush(&mut self) -> Vec<Conflict> {
        self.suppressed = 0;
        std::mem::take(&mut self.conflicts)
    }
}

impl DiagnosticSink for ConflictQueue {
    fn report(&mut self, kind: ConflictKind, existing: Decl, new: Decl) {
        self.add(Conflict::new(kind, existing, new));
    }
}

#[cfg(test)]
mod tests;
