//! Backend support for the Kite compiler.
//!
//! Currently this is the frame allocator: [`FrameMap`] hands out local
//! variable slots while a function body is emitted, and [`FrameScope`]
//! gives blocks their slots back when they end.

pub mod frame;

pub use frame::{Checkpoint, FrameMap, FrameScope, FrameSlot};
