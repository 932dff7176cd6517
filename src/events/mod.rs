//! Event payloads routed through the layer stack.
//!
//! These are the discrete, edge-triggered counterparts to the continuous
//! [`InputSnapshot`](crate::input::InputSnapshot): key and mouse-button
//! transitions, pointer motion, text input, window resize and quit requests.
//! The platform backend produces them once per frame and the
//! [`LayerStack`](crate::layers::LayerStack) offers each one to the layers
//! top to bottom until a handler claims it.

use raylib::prelude::Vector2;

use crate::input::InputCode;

/// A key (or mouse-button code) transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which code changed state.
    pub code: InputCode,
    /// Press (true) or release (false).
    pub pressed: bool,
}

impl KeyEvent {
    /// Shorthand for "this event is `code` going down".
    pub fn is_press(&self, code: InputCode) -> bool {
        self.pressed && self.code == code
    }
}

/// A mouse button transition, with the pointer position at the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    /// Which button changed state. Always one of the mouse-button codes.
    pub button: InputCode,
    /// Press (true) or release (false).
    pub pressed: bool,
    /// Pointer position in window coordinates.
    pub position: Vector2,
}

/// Pointer motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    /// Pointer position in window coordinates.
    pub position: Vector2,
    /// Movement since the previous frame.
    pub delta: Vector2,
}
