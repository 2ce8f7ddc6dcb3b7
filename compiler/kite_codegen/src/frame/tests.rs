use kite_ir::{DeclArena, Name};
use pretty_assertions::assert_eq;

use super::*;

fn locals(arena: &mut DeclArena, count: u32) -> Vec<Decl> {
    (0..count)
        .map(|n| arena.variable(Name::from_raw(n + 1)))
        .collect()
}

#[test]
fn enter_and_leave_in_reverse_order() {
    let mut arena = DeclArena::new();
    let [a, b] = [arena.variable(Name::from_raw(1)), arena.variable(Name::from_raw(2))];
    let mut frame = FrameMap::new();
    let start = frame.next_free_slot();

    assert_eq!(frame.enter(a, 1), 0);
    assert_eq!(frame.enter(b, 2), 1);
    assert_eq!(frame.next_free_slot(), 3);
    assert_eq!(frame.slot_of(b), Some(FrameSlot { index: 1, size: 2 }));

    assert_eq!(frame.leave(b), Some(1));
    assert_eq!(frame.leave(a), Some(0));
    assert_eq!(frame.next_free_slot(), start);
    assert!(frame.is_empty());
}

#[test]
fn leave_unbound_entity_changes_nothing() {
    let mut arena = DeclArena::new();
    let [a, stranger] = [arena.variable(Name::from_raw(1)), arena.variable(Name::from_raw(2))];
    let mut frame = FrameMap::new();
    frame.enter(a, 1);

    assert_eq!(frame.leave(stranger), None);
    assert_eq!(frame.next_free_slot(), 1);
    assert_eq!(frame.index_of(a), Some(0));
}

#[test]
fn index_of_unbound_is_none() {
    let mut arena = DeclArena::new();
    let a = arena.variable(Name::from_raw(1));
    let mut frame = FrameMap::new();
    assert_eq!(frame.index_of(a), None);

    frame.enter(a, 1);
    frame.leave(a);
    assert_eq!(frame.index_of(a), None);
}

#[test]
fn entity_can_be_reentered_after_leaving() {
    let mut arena = DeclArena::new();
    let a = arena.variable(Name::from_raw(1));
    let mut frame = FrameMap::new();
    frame.enter_temp();

    frame.enter(a, 2);
    frame.leave(a);
    assert_eq!(frame.enter(a, 1), 1);
    assert_eq!(frame.slot_of(a), Some(FrameSlot { index: 1, size: 1 }));
}

#[test]
fn temps_take_anonymous_slots() {
    let mut arena = DeclArena::new();
    let a = arena.variable(Name::from_raw(1));
    let mut frame = FrameMap::new();

    assert_eq!(frame.enter_temp(), 0);
    assert_eq!(frame.enter_temp_sized(2), 1);
    assert_eq!(frame.enter(a, 1), 3);
    assert_eq!(frame.len(), 1);

    frame.leave(a);
    frame.leave_temp_sized(2);
    assert_eq!(frame.next_free_slot(), 1);
    frame.leave_temp();
    assert_eq!(frame.next_free_slot(), 0);
}

#[test]
fn restore_drops_bindings_at_or_above_checkpoint() {
    let mut arena = DeclArena::new();
    let [a, b, c] = [
        arena.variable(Name::from_raw(1)),
        arena.variable(Name::from_raw(2)),
        arena.variable(Name::from_raw(3)),
    ];
    let mut frame = FrameMap::new();

    frame.enter(a, 1);
    let after_a = frame.next_free_slot();
    let checkpoint = frame.checkpoint();
    frame.enter(b, 1);
    frame.enter(c, 1);

    frame.restore(checkpoint);

    assert_eq!(frame.index_of(a), Some(0));
    assert_eq!(frame.index_of(b), None);
    assert_eq!(frame.index_of(c), None);
    assert_eq!(frame.next_free_slot(), after_a);
    assert_eq!(frame.len(), 1);
}

#[test]
fn restore_releases_temps_above_checkpoint() {
    let mut frame = FrameMap::new();
    frame.enter_temp();
    let checkpoint = frame.checkpoint();
    frame.enter_temp_sized(4);

    frame.restore(checkpoint);
    assert_eq!(frame.next_free_slot(), 1);
    assert_eq!(frame.enter_temp(), 1);
}

#[test]
fn restore_to_current_top_is_a_no_op() {
    let mut arena = DeclArena::new();
    let a = arena.variable(Name::from_raw(1));
    let mut frame = FrameMap::new();
    frame.enter(a, 2);

    let checkpoint = frame.checkpoint();
    frame.restore(checkpoint);

    assert_eq!(frame.index_of(a), Some(0));
    assert_eq!(frame.next_free_slot(), 2);
}

#[test]
fn wide_entity_straddling_checkpoint_is_kept() {
    // Only the start index is compared against the mark.
    let mut arena = DeclArena::new();
    let wide = arena.variable(Name::from_raw(1));
    let mut frame = FrameMap::new();
    frame.enter(wide, 2);
    let checkpoint = frame.checkpoint();

    frame.restore(checkpoint);
    assert_eq!(frame.slot_of(wide), Some(FrameSlot { index: 0, size: 2 }));
}

// Guards

#[test]
fn scoped_guard_restores_on_drop() {
    let mut arena = DeclArena::new();
    let [outer, inner] = [arena.variable(Name::from_raw(1)), arena.variable(Name::from_raw(2))];
    let mut frame = FrameMap::new();
    frame.enter(outer, 1);

    {
        let mut block = frame.scoped();
        assert_eq!(block.checkpoint_on_exit(), Checkpoint(1));
        assert_eq!(block.enter(inner, 2), 1);
        block.enter_temp();
        assert_eq!(block.next_free_slot(), 4);
    }

    assert_eq!(frame.index_of(outer), Some(0));
    assert_eq!(frame.index_of(inner), None);
    assert_eq!(frame.next_free_slot(), 1);
}

#[test]
fn nested_guards_release_innermost_first() {
    let mut arena = DeclArena::new();
    let [a, b, c] = [
        arena.variable(Name::from_raw(1)),
        arena.variable(Name::from_raw(2)),
        arena.variable(Name::from_raw(3)),
    ];
    let mut frame = FrameMap::new();

    frame.with_block(|outer| {
        outer.enter(a, 1);
        outer.with_block(|inner| {
            inner.enter(b, 1);
            inner.enter(c, 1);
            assert_eq!(inner.len(), 3);
        });
        assert_eq!(outer.len(), 1);
        assert_eq!(outer.next_free_slot(), 1);
    });

    assert!(frame.is_empty());
    assert_eq!(frame.next_free_slot(), 0);
}

#[test]
fn guard_restores_on_early_return() {
    fn emit(frame: &mut FrameMap, local: Decl, fail: bool) -> Result<u32, &'static str> {
        frame.with_slot(local, 1, |block, index| {
            block.enter_temp_sized(2);
            if fail {
                return Err("bail");
            }
            Ok(index)
        })
    }

    let mut arena = DeclArena::new();
    let local = arena.variable(Name::from_raw(1));
    let mut frame = FrameMap::new();
    frame.enter_temp();

    assert_eq!(emit(&mut frame, local, true), Err("bail"));
    assert_eq!(frame.next_free_slot(), 1);
    assert_eq!(frame.index_of(local), None);

    assert_eq!(emit(&mut frame, local, false), Ok(1));
    assert_eq!(frame.next_free_slot(), 1);
}

#[test]
fn guard_restores_during_unwinding() {
    let mut arena = DeclArena::new();
    let local = arena.variable(Name::from_raw(1));
    let mut frame = FrameMap::new();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        frame.with_slot(local, 1, |_, _| panic!("codegen failed"));
    }));

    assert!(result.is_err());
    assert!(frame.is_empty());
    assert_eq!(frame.next_free_slot(), 0);
}

#[test]
fn with_slot_hands_out_consecutive_slots() {
    let mut arena = DeclArena::new();
    let params = locals(&mut arena, 3);
    let mut frame = FrameMap::new();

    let indices = frame.with_slot(params[0], 1, |block, first| {
        block.with_slot(params[1], 2, |block, second| {
            block.with_slot(params[2], 1, |_, third| vec![first, second, third])
        })
    });

    assert_eq!(indices, vec![0, 1, 3]);
    assert!(frame.is_empty());
}

mod proptest_frame {
    use kite_ir::DeclArena;
    use proptest::prelude::*;

    use super::locals;
    use crate::frame::FrameMap;

    proptest! {
        #[test]
        fn lifo_leave_returns_entry_indices(sizes in proptest::collection::vec(1u32..4, 0..32)) {
            let mut arena = DeclArena::new();
            let entities = locals(&mut arena, u32::try_from(sizes.len()).unwrap_or(0));
            let mut frame = FrameMap::new();

            let mut expected = Vec::with_capacity(sizes.len());
            let mut top = 0;
            for (&entity, &size) in entities.iter().zip(&sizes) {
                prop_assert_eq!(frame.enter(entity, size), top);
                expected.push(top);
                top += size;
            }
            prop_assert_eq!(frame.next_free_slot(), top);

            for (&entity, &index) in entities.iter().zip(&expected).rev() {
                prop_assert_eq!(frame.leave(entity), Some(index));
            }
            prop_assert_eq!(frame.next_free_slot(), 0);
            prop_assert!(frame.is_empty());
        }

        #[test]
        fn restore_keeps_exactly_the_prefix(
            sizes in proptest::collection::vec(1u32..4, 1..32),
            split in any::<prop::sample::Index>(),
        ) {
            let mut arena = DeclArena::new();
            let entities = locals(&mut arena, u32::try_from(sizes.len()).unwrap_or(0));
            let keep = split.index(sizes.len() + 1);
            let mut frame = FrameMap::new();

            for (&entity, &size) in entities[..keep].iter().zip(&sizes) {
                frame.enter(entity, size);
            }
            let mark = frame.next_free_slot();
            let checkpoint = frame.checkpoint();
            for (&entity, &size) in entities[keep..].iter().zip(&sizes[keep..]) {
                frame.enter(entity, size);
            }

            frame.restore(checkpoint);

            prop_assert_eq!(frame.next_free_slot(), mark);
            prop_assert_eq!(frame.len(), keep);
            for (i, &entity) in entities.iter().enumerate() {
                prop_assert_eq!(frame.index_of(entity).is_some(), i < keep);
            }
        }
    }
}
