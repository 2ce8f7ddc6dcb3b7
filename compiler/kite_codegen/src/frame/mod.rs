//! Local-variable slot allocation for one function frame.
//!
//! Slots are handed out like a stack: `enter` places an entity at the next
//! free index and advances past it, `leave` gives the space back. Wide values
//! (longs, doubles) take more than one slot.
//!
//! Blocks that declare several locals can take a [`Checkpoint`] on entry and
//! [`restore`](FrameMap::restore) it on exit instead of leaving each one, or
//! use the [`FrameScope`] guard which does that on drop.
//!
//! # Preconditions
//!
//! Callers leave entities in reverse order of entering them, and only restore
//! checkpoints taken from the same map that are not above the current top.
//! Debug builds assert both; release builds trust the caller.

use kite_ir::{Decl, DeclId};
use rustc_hash::FxHashMap;

mod guard;

pub use guard::FrameScope;

/// Where a bound entity lives in the frame.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FrameSlot {
    /// First slot occupied.
    pub index: u32,
    /// Number of consecutive slots occupied.
    pub size: u32,
}

impl FrameSlot {
    /// One past the last occupied slot.
    #[inline]
    pub fn end(self) -> u32 {
        self.index + self.size
    }
}

/// A saved top-of-frame position. See [`FrameMap::checkpoint`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[must_use = "a checkpoint does nothing unless restored"]
pub struct Checkpoint(u32);

/// Slot assignments for the locals of the function being emitted.
#[derive(Clone, Debug, Default)]
pub struct FrameMap {
    slots: FxHashMap<DeclId, FrameSlot>,
    next_free: u32,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `entity` to `size` slots starting at the current top.
    ///
    /// Returns the first slot index.
    ///
    /// # Panics
    /// Panics if the frame would exceed `u32::MAX` slots.
    pub fn enter(&mut self, entity: Decl, size: u32) -> u32 {
        debug_assert!(size >= 1, "entity {entity:?} entered with size 0");
        let index = self.next_free;
        self.next_free = self.advance(size);
        let previous = self.slots.insert(entity.id(), FrameSlot { index, size });
        debug_assert!(previous.is_none(), "entity {entity:?} entered twice");
        tracing::trace!(?entity, index, size, "enter");
        index
    }

    /// Unbind `entity` and give its slots back.
    ///
    /// Returns the index it held, or `None` if it was not bound, in which
    /// case nothing changes.
    pub fn leave(&mut self, entity: Decl) -> Option<u32> {
        let slot = self.slots.remove(&entity.id())?;
        debug_assert_eq!(
            slot.end(),
            self.next_free,
            "entity {entity:?} left out of order"
        );
        self.next_free = self.next_free.saturating_sub(slot.size);
        tracing::trace!(?entity, index = slot.index, "leave");
        Some(slot.index)
    }

    /// Reserve one anonymous slot and return its index.
    pub fn enter_temp(&mut self) -> u32 {
        self.enter_temp_sized(1)
    }

    /// Reserve `size` anonymous slots and return the first index.
    ///
    /// # Panics
    /// Panics if the frame would exceed `u32::MAX` slots.
    pub fn enter_temp_sized(&mut self, size: u32) -> u32 {
        let index = self.next_free;
        self.next_free = self.advance(size);
        index
    }

    /// Release the slot taken by the matching [`enter_temp`](Self::enter_temp).
    pub fn leave_temp(&mut self) {
        self.leave_temp_sized(1);
    }

    /// Release `size` slots taken by the matching
    /// [`enter_temp_sized`](Self::enter_temp_sized).
    pub fn leave_temp_sized(&mut self, size: u32) {
        debug_assert!(size <= self.next_free, "released more temps than entered");
        self.next_free = self.next_free.saturating_sub(size);
    }

    /// Slot index of `entity`, or `None` when it is not bound.
    pub fn index_of(&self, entity: Decl) -> Option<u32> {
        self.slot_of(entity).map(|slot| slot.index)
    }

    pub fn slot_of(&self, entity: Decl) -> Option<FrameSlot> {
        self.slots.get(&entity.id()).copied()
    }

    /// Remember the current top of the frame.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.next_free)
    }

    /// Drop every binding at or above `checkpoint` and reset the top to it.
    ///
    /// Anonymous temps above the checkpoint are released too.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        let mark = checkpoint.0;
        debug_assert!(
            mark <= self.next_free,
            "checkpoint {mark} is above the frame top {}",
            self.next_free
        );
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.index < mark);
        tracing::trace!(mark, dropped = before - self.slots.len(), "restore");
        self.next_free = mark;
    }

    /// Index the next `enter` or `enter_temp` will return.
    pub fn next_free_slot(&self) -> u32 {
        self.next_free
    }

    /// Number of bound entities. Temps are not counted.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn advance(&self, size: u32) -> u32 {
        self.next_free
            .checked_add(size)
            .unwrap_or_else(|| panic!("frame exceeded u32::MAX slots"))
    }
}

#[cfg(test)]
mod tests;
