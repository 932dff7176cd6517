//! The fixed set of input codes the engine understands.
//!
//! Platform backends translate raw key/button identifiers into [`InputCode`]
//! before anything else sees them. Codes double as indices into the
//! [`InputSnapshot`](crate::input::InputSnapshot) pressed array, so the
//! enumeration is closed and the discriminants are stable.

/// A keyboard key or mouse button the engine tracks.
///
/// The discriminant is the index of the code in the snapshot's pressed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum InputCode {
    KeyW = 0,
    KeyA = 1,
    KeyS = 2,
    KeyD = 3,
    KeyE = 4,
    KeyF = 5,
    KeyQ = 6,
    KeyR = 7,
    Space = 8,
    Enter = 9,
    Escape = 10,
    Tab = 11,
    Backspace = 12,
    LeftShift = 13,
    LeftControl = 14,
    ArrowUp = 15,
    ArrowDown = 16,
    ArrowLeft = 17,
    ArrowRight = 18,
    F1 = 19,
    F10 = 20,
    F11 = 21,
    F12 = 22,
    MouseLeft = 23,
    MouseRight = 24,
    MouseMiddle = 25,
}

impl InputCode {
    /// Number of codes in the enumeration. Also the length of the snapshot's
    /// pressed array.
    pub const COUNT: usize = 26;

    /// All codes, in discriminant order.
    pub const ALL: [InputCode; InputCode::COUNT] = [
        InputCode::KeyW,
        InputCode::KeyA,
        InputCode::KeyS,
        InputCode::KeyD,
        InputCode::KeyE,
        InputCode::KeyF,
        InputCode::KeyQ,
        InputCode::KeyR,
        InputCode::Space,
        InputCode::Enter,
        InputCode::Escape,
        InputCode::Tab,
        InputCode::Backspace,
        InputCode::LeftShift,
        InputCode::LeftControl,
        InputCode::ArrowUp,
        InputCode::ArrowDown,
        InputCode::ArrowLeft,
        InputCode::ArrowRight,
        InputCode::F1,
        InputCode::F10,
        InputCode::F11,
        InputCode::F12,
        InputCode::MouseLeft,
        InputCode::MouseRight,
        InputCode::MouseMiddle,
    ];

    /// Index of this code in the snapshot's pressed array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look a code up by array index. Out-of-range indices come from
    /// malformed translation tables and yield `None` rather than an error.
    pub fn from_index(index: usize) -> Option<InputCode> {
        InputCode::ALL.get(index).copied()
    }

    /// Whether this code is a mouse button rather than a keyboard key.
    pub fn is_mouse_button(self) -> bool {
        matches!(
            self,
            InputCode::MouseLeft | InputCode::MouseRight | InputCode::MouseMiddle
        )
    }

    /// Stable lowercase name, used by the key-bindings file.
    pub fn name(self) -> &'static str {
        match self {
            InputCode::KeyW => "key_w",
            InputCode::KeyA => "key_a",
            InputCode::KeyS => "key_s",
            InputCode::KeyD => "key_d",
            InputCode::KeyE => "key_e",
            InputCode::KeyF => "key_f",
            InputCode::KeyQ => "key_q",
            InputCode::KeyR => "key_r",
            InputCode::Space => "space",
            InputCode::Enter => "enter",
            InputCode::Escape => "escape",
            InputCode::Tab => "tab",
            InputCode::Backspace => "backspace",
            InputCode::LeftShift => "left_shift",
            InputCode::LeftControl => "left_control",
            InputCode::ArrowUp => "arrow_up",
            InputCode::ArrowDown => "arrow_down",
            InputCode::ArrowLeft => "arrow_left",
            InputCode::ArrowRight => "arrow_right",
            InputCode::F1 => "f1",
            InputCode::F10 => "f10",
            InputCode::F11 => "f11",
            InputCode::F12 => "f12",
            InputCode::MouseLeft => "mouse_left",
            InputCode::MouseRight => "mouse_right",
            InputCode::MouseMiddle => "mouse_middle",
        }
    }

    /// Inverse of [`InputCode::name`]. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<InputCode> {
        InputCode::ALL.iter().copied().find(|c| c.name() == name)
    }
}
