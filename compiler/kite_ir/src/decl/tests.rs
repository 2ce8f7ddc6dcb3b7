use super::*;
use pretty_assertions::assert_eq;

fn name(n: u32) -> Name {
    Name::from_raw(n)
}

#[test]
fn equality_is_identity_not_name() {
    let mut arena = DeclArena::new();
    let a = arena.variable(name(1));
    let b = arena.variable(name(1));

    assert_ne!(a, b);
    assert_eq!(a, a);
    assert_eq!(a.name(), b.name());
}

#[test]
fn hash_follows_identity() {
    use std::collections::HashSet;

    let mut arena = DeclArena::new();
    let a = arena.variable(name(1));
    let b = arena.function(name(1));

    let mut set = HashSet::new();
    set.insert(a);
    set.insert(a);
    set.insert(b);
    assert_eq!(set.len(), 2);
}

#[test]
fn arena_hands_out_sequential_ids() {
    let mut arena = DeclArena::new();
    let a = arena.variable(name(1));
    let b = arena.namespace(name(2));

    assert_eq!(a.id(), DeclId::from_raw(0));
    assert_eq!(b.id(), DeclId::from_raw(1));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(b.id()), Some(b));
    assert_eq!(arena.get(DeclId::from_raw(9)), None);
}

#[test]
fn kind_predicates() {
    assert!(DeclKind::Variable.is_variable());
    assert!(DeclKind::Property.is_variable());
    assert!(!DeclKind::Function.is_variable());
    assert!(DeclKind::Function.is_function());
    assert!(DeclKind::Classifier(ClassifierKind::TypeParameter).is_classifier());
    assert!(DeclKind::Namespace.is_namespace());
}

#[test]
fn anonymous_declarations() {
    let mut arena = DeclArena::new();
    assert!(arena.variable(Name::EMPTY).is_anonymous());
    assert!(!arena.variable(name(3)).is_anonymous());
}

#[test]
fn only_real_classifiers_define_their_own_this() {
    let mut arena = DeclArena::new();
    assert!(arena.classifier(name(1), ClassifierKind::Class).defines_own_this());
    assert!(arena.classifier(name(2), ClassifierKind::Interface).defines_own_this());
    assert!(arena.classifier(name(3), ClassifierKind::Object).defines_own_this());
    assert!(!arena.classifier(name(4), ClassifierKind::TypeParameter).defines_own_this());
    assert!(!arena.function(name(5)).defines_own_this());
    assert!(!arena.namespace(name(6)).defines_own_this());
}

#[test]
fn iter_preserves_allocation_order() {
    let mut arena = DeclArena::new();
    let a = arena.property(name(1));
    let b = arena.variable(name(2));
    let all: Vec<Decl> = arena.iter().collect();
    assert_eq!(all, vec![a, b]);
    assert_eq!(a.kind(), DeclKind::Property);
}
