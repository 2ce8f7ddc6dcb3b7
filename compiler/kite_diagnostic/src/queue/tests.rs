use kite_ir::{DeclArena, Name};
use pretty_assertions::assert_eq;

use super::*;

fn three_decls() -> (Decl, Decl, Decl) {
    let mut arena = DeclArena::new();
    let x = Name::from_raw(1);
    (arena.variable(x), arena.variable(x), arena.variable(x))
}

#[test]
fn test_default_config_is_unbounded_with_dedup() {
    let config = DiagnosticConfig::default();
    assert_eq!(config.error_limit, 0);
    assert!(config.deduplicate);
}

#[test]
fn test_report_collects_in_order() {
    let (a, b, c) = three_decls();
    let mut queue = ConflictQueue::new();
    queue.report(ConflictKind::Redeclaration, a, b);
    queue.report(ConflictKind::Redeclaration, b, c);

    assert_eq!(
        queue.peek(),
        &[
            Conflict::new(ConflictKind::Redeclaration, a, b),
            Conflict::new(ConflictKind::Redeclaration, b, c),
        ]
    );
    assert!(queue.has_errors().is_some());
}

#[test]
fn test_empty_queue_has_no_errors() {
    let queue = ConflictQueue::new();
    assert!(queue.is_empty());
    assert!(queue.has_errors().is_none());
}

#[test]
fn test_deduplicates_identical_consecutive_reports() {
    let (a, b, _) = three_decls();
    let mut queue = ConflictQueue::new();
    assert!(queue.add(Conflict::new(ConflictKind::Redeclaration, a, b)));
    assert!(!queue.add(Conflict::new(ConflictKind::Redeclaration, a, b)));
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.suppressed(), 1);
}

#[test]
fn test_unlimited_keeps_duplicates() {
    let (a, b, _) = three_decls();
    let mut queue = ConflictQueue::with_config(DiagnosticConfig::unlimited());
    queue.report(ConflictKind::Redeclaration, a, b);
    queue.report(ConflictKind::Redeclaration, a, b);
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_error_limit() {
    let (a, b, c) = three_decls();
    let mut queue = ConflictQueue::with_config(DiagnosticConfig::strict(1));
    assert!(queue.add(Conflict::new(ConflictKind::Redeclaration, a, b)));
    assert!(queue.limit_reached());
    assert!(!queue.add(Conflict::new(ConflictKind::Redeclaration, b, c)));
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.suppressed(), 1);
}

#[test]
fn test_flush_resets_queue() {
    let (a, b, _) = three_decls();
    let mut queue = ConflictQueue::new();
    queue.report(ConflictKind::Redeclaration, a, b);

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 1);
    assert!(queue.is_empty());
    assert_eq!(queue.suppressed(), 0);
}
