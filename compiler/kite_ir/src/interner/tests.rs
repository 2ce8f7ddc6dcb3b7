use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let hello = interner.intern("hello");
    let world = interner.intern("world");
    let hello2 = interner.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.lookup(hello), "hello");
    assert_eq!(interner.lookup(world), "world");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    assert!(interner.is_empty());
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_len_counts_distinct_strings() {
    let interner = StringInterner::new();
    interner.intern("a");
    interner.intern("b");
    interner.intern("a");
    assert_eq!(interner.len(), 3);
    assert!(!interner.is_empty());
}

#[test]
fn test_foreign_name_resolves_to_empty() {
    let interner = StringInterner::new();
    let foreign = Name::from_raw(999);
    assert_eq!(interner.get(foreign), None);
    assert_eq!(interner.lookup(foreign), "");
}

#[test]
fn test_try_intern_succeeds() {
    let interner = StringInterner::new();
    let name = interner.try_intern("outer");
    assert_eq!(name, Ok(interner.intern("outer")));
}

#[test]
fn test_intern_error_display() {
    let err = InternError::Overflow { count: 5 };
    assert_eq!(
        err.to_string(),
        format!("interner exceeded capacity: 5 strings, max is {}", u32::MAX)
    );
}

#[test]
fn test_shared_across_threads() {
    use std::sync::Arc;

    let interner = Arc::new(StringInterner::new());
    let other = Arc::clone(&interner);
    let from_thread = std::thread::spawn(move || other.intern("shared"))
        .join()
        .unwrap_or_default();
    assert_eq!(interner.intern("shared"), from_thread);
}
