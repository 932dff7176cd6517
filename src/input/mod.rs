//! Input codes and per-frame input state.
//!
//! The engine reduces whatever the platform reports to a fixed enumeration of
//! [`InputCode`]s (keyboard keys plus mouse buttons) and a per-frame
//! [`InputSnapshot`] holding the pressed state for every code along with the
//! mouse position, delta and wheel movement.
//!
//! The snapshot is the unit of currency of the layer stack's tick pass: one
//! live snapshot is threaded through the layers top to bottom, and layers may
//! zero out parts of it (or all of it) to hide input from the layers below.

pub mod code;
pub mod snapshot;

pub use code::InputCode;
pub use snapshot::InputSnapshot;
