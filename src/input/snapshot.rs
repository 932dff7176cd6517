//! Per-frame input state record.
//!
//! An [`InputSnapshot`] captures the pressed state of every [`InputCode`]
//! plus the mouse position, mouse delta and wheel movement for one frame.
//! The platform backend refreshes one live snapshot before the tick pass;
//! layers mutate it in place while it travels down the stack.
//!
//! [`InputSnapshot::BLANK`] is the shared all-false snapshot handed to layers
//! that sit below a full-filter point, so they still tick but see no input.

use arrayvec::ArrayVec;
use raylib::prelude::Vector2;

use crate::input::InputCode;

/// Pressed state for every input code plus pointer motion for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    pressed: [bool; InputCode::COUNT],
    /// Mouse position in window coordinates.
    pub mouse_position: Vector2,
    /// Mouse movement since the previous frame.
    pub mouse_delta: Vector2,
    /// Wheel movement this frame, positive away from the user.
    pub wheel_move: f32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        InputSnapshot::BLANK
    }
}

impl InputSnapshot {
    /// The all-false snapshot. Layers below a full-filter point receive a
    /// reference to this instead of the live snapshot.
    pub const BLANK: InputSnapshot = InputSnapshot {
        pressed: [false; InputCode::COUNT],
        mouse_position: Vector2 { x: 0.0, y: 0.0 },
        mouse_delta: Vector2 { x: 0.0, y: 0.0 },
        wheel_move: 0.0,
    };

    /// Whether `code` is currently pressed.
    pub fn is_pressed(&self, code: InputCode) -> bool {
        self.pressed[code.index()]
    }

    /// Record the pressed state of `code`.
    pub fn set_pressed(&mut self, code: InputCode, pressed: bool) {
        self.pressed[code.index()] = pressed;
    }

    /// Zero out a single code. Used by layer filters to hide one key or
    /// button from the layers below.
    pub fn clear(&mut self, code: InputCode) {
        self.pressed[code.index()] = false;
    }

    /// Zero out every code and all pointer motion.
    pub fn clear_all(&mut self) {
        *self = InputSnapshot::BLANK;
    }

    /// Whether any code at all is pressed.
    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|p| *p)
    }

    /// Collect the currently pressed codes without allocating. Handy for
    /// debug overlays.
    pub fn pressed_codes(&self) -> ArrayVec<InputCode, { InputCode::COUNT }> {
        InputCode::ALL
            .iter()
            .copied()
            .filter(|c| self.is_pressed(*c))
            .collect()
    }
}
