//! RAII block scopes over a [`FrameMap`].
//!
//! [`FrameScope`] takes a checkpoint when it is created and restores it when
//! dropped, so every local entered through the guard is released on every
//! exit path: normal fallthrough, `?` and early `return`, and unwinding.
//!
//! # Usage
//!
//! ```text
//! {
//!     let mut block = frame.scoped();
//!     let slot = block.enter(local, 1);
//!     emit_body(&mut block, slot)?;
//! } // slots released here
//!
//! frame.with_slot(param, 2, |block, slot| emit_body(block, slot))
//! ```

use std::ops::{Deref, DerefMut};

use kite_ir::Decl;

use super::{Checkpoint, FrameMap};

/// Guard that restores a [`FrameMap`] to the checkpoint taken at creation.
///
/// Derefs to the frame map, so the guard can be used in place of it. Guards
/// nest: an inner guard borrows the outer one mutably and releases its own
/// block first.
pub struct FrameScope<'frame> {
    frame: &'frame mut FrameMap,
    checkpoint: Checkpoint,
}

impl FrameScope<'_> {
    /// The checkpoint this guard will restore on drop.
    pub fn checkpoint_on_exit(&self) -> Checkpoint {
        self.checkpoint
    }
}

impl Drop for FrameScope<'_> {
    fn drop(&mut self) {
        self.frame.restore(self.checkpoint);
    }
}

impl Deref for FrameScope<'_> {
    type Target = FrameMap;

    fn deref(&self) -> &Self::Target {
        self.frame
    }
}

impl DerefMut for FrameScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.frame
    }
}

impl FrameMap {
    /// Open a block whose slots are released when the guard drops.
    pub fn scoped(&mut self) -> FrameScope<'_> {
        let checkpoint = self.checkpoint();
        FrameScope {
            frame: self,
            checkpoint,
        }
    }

    /// Run `f` inside a fresh block.
    pub fn with_block<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut FrameScope<'_>) -> T,
    {
        let mut block = self.scoped();
        f(&mut block)
    }

    /// Run `f` inside a fresh block with `entity` bound to `size` slots.
    ///
    /// `f` receives the entity's slot index. The entity is released along
    /// with anything else `f` entered.
    pub fn with_slot<T, F>(&mut self, entity: Decl, size: u32, f: F) -> T
    where
        F: FnOnce(&mut FrameScope<'_>, u32) -> T,
    {
        self.with_block(|block| {
            let index = block.enter(entity, size);
            f(block, index)
        })
    }
}
