//! Platform backend: window input translated into engine terms.
//!
//! Raylib owns the window and the raw device state; this module reduces it
//! to the engine's vocabulary once per frame. [`keymap`] maps raylib
//! key/button identifiers to [`InputCode`](crate::input::InputCode)s (with
//! optional user overrides from a JSON bindings file) and [`pump`] turns the
//! polled state into the refreshed snapshot plus the edge-triggered events
//! the layer stack routes.

pub mod keymap;
pub mod pump;
