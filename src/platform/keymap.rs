//! Translation table from raylib keys and buttons to input codes.
//!
//! The default table binds every [`InputCode`] to the obvious physical key.
//! A JSON bindings file can rebind keyboard codes:
//!
//! ```json
//! {
//!     "key_w": "UP",
//!     "key_s": "DOWN"
//! }
//! ```
//!
//! Keys are matched by the names below; entries naming an unknown code or
//! key are ignored (a malformed table must never take the engine down).

use raylib::prelude::{KeyboardKey, MouseButton};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

use crate::input::InputCode;

/// Current code-to-key translation table.
pub struct Keymap {
    keys: Vec<(InputCode, KeyboardKey)>,
    buttons: Vec<(InputCode, MouseButton)>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            keys: vec![
                (InputCode::KeyW, KeyboardKey::KEY_W),
                (InputCode::KeyA, KeyboardKey::KEY_A),
                (InputCode::KeyS, KeyboardKey::KEY_S),
                (InputCode::KeyD, KeyboardKey::KEY_D),
                (InputCode::KeyE, KeyboardKey::KEY_E),
                (InputCode::KeyF, KeyboardKey::KEY_F),
                (InputCode::KeyQ, KeyboardKey::KEY_Q),
                (InputCode::KeyR, KeyboardKey::KEY_R),
                (InputCode::Space, KeyboardKey::KEY_SPACE),
                (InputCode::Enter, KeyboardKey::KEY_ENTER),
                (InputCode::Escape, KeyboardKey::KEY_ESCAPE),
                (InputCode::Tab, KeyboardKey::KEY_TAB),
                (InputCode::Backspace, KeyboardKey::KEY_BACKSPACE),
                (InputCode::LeftShift, KeyboardKey::KEY_LEFT_SHIFT),
                (InputCode::LeftControl, KeyboardKey::KEY_LEFT_CONTROL),
                (InputCode::ArrowUp, KeyboardKey::KEY_UP),
                (InputCode::ArrowDown, KeyboardKey::KEY_DOWN),
                (InputCode::ArrowLeft, KeyboardKey::KEY_LEFT),
                (InputCode::ArrowRight, KeyboardKey::KEY_RIGHT),
                (InputCode::F1, KeyboardKey::KEY_F1),
                (InputCode::F10, KeyboardKey::KEY_F10),
                (InputCode::F11, KeyboardKey::KEY_F11),
                (InputCode::F12, KeyboardKey::KEY_F12),
            ],
            buttons: vec![
                (InputCode::MouseLeft, MouseButton::MOUSE_BUTTON_LEFT),
                (InputCode::MouseRight, MouseButton::MOUSE_BUTTON_RIGHT),
                (InputCode::MouseMiddle, MouseButton::MOUSE_BUTTON_MIDDLE),
            ],
        }
    }
}

/// Bindings file contents: input code name -> key name.
#[derive(Deserialize)]
struct BindingsFile(FxHashMap<String, String>);

impl Keymap {
    /// Keyboard bindings, code first.
    pub fn keys(&self) -> &[(InputCode, KeyboardKey)] {
        &self.keys
    }

    /// Mouse button bindings, code first.
    pub fn buttons(&self) -> &[(InputCode, MouseButton)] {
        &self.buttons
    }

    /// The key currently bound to `code`, if any.
    pub fn key_for(&self, code: InputCode) -> Option<KeyboardKey> {
        self.keys
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, k)| *k)
    }

    /// Rebind a keyboard code to a different key.
    pub fn rebind(&mut self, code: InputCode, key: KeyboardKey) {
        if let Some(entry) = self.keys.iter_mut().find(|(c, _)| *c == code) {
            entry.1 = key;
        }
    }

    /// Load keyboard overrides from a JSON bindings file.
    pub fn load_overrides(&mut self, path: &Path) -> Result<(), String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        self.apply_overrides(&text)
    }

    /// Apply keyboard overrides from JSON text. Entries naming unknown
    /// codes or keys are skipped; mouse buttons cannot be rebound.
    pub fn apply_overrides(&mut self, text: &str) -> Result<(), String> {
        let bindings: BindingsFile =
            serde_json::from_str(text).map_err(|e| format!("bad bindings file: {}", e))?;
        for (code_name, key_name) in bindings.0 {
            let Some(code) = InputCode::from_name(&code_name) else {
                log::debug!("bindings: unknown input code '{}'", code_name);
                continue;
            };
            let Some(key) = key_from_name(&key_name) else {
                log::debug!("bindings: unknown key '{}'", key_name);
                continue;
            };
            self.rebind(code, key);
        }
        Ok(())
    }
}

/// Look a raylib key up by the name used in bindings files.
fn key_from_name(name: &str) -> Option<KeyboardKey> {
    let key = match name {
        "A" => KeyboardKey::KEY_A,
        "B" => KeyboardKey::KEY_B,
        "C" => KeyboardKey::KEY_C,
        "D" => KeyboardKey::KEY_D,
        "E" => KeyboardKey::KEY_E,
        "F" => KeyboardKey::KEY_F,
        "G" => KeyboardKey::KEY_G,
        "Q" => KeyboardKey::KEY_Q,
        "R" => KeyboardKey::KEY_R,
        "S" => KeyboardKey::KEY_S,
        "T" => KeyboardKey::KEY_T,
        "W" => KeyboardKey::KEY_W,
        "X" => KeyboardKey::KEY_X,
        "Z" => KeyboardKey::KEY_Z,
        "SPACE" => KeyboardKey::KEY_SPACE,
        "ENTER" => KeyboardKey::KEY_ENTER,
        "ESCAPE" => KeyboardKey::KEY_ESCAPE,
        "TAB" => KeyboardKey::KEY_TAB,
        "BACKSPACE" => KeyboardKey::KEY_BACKSPACE,
        "LEFT_SHIFT" => KeyboardKey::KEY_LEFT_SHIFT,
        "LEFT_CONTROL" => KeyboardKey::KEY_LEFT_CONTROL,
        "UP" => KeyboardKey::KEY_UP,
        "DOWN" => KeyboardKey::KEY_DOWN,
        "LEFT" => KeyboardKey::KEY_LEFT,
        "RIGHT" => KeyboardKey::KEY_RIGHT,
        "F1" => KeyboardKey::KEY_F1,
        "F10" => KeyboardKey::KEY_F10,
        "F11" => KeyboardKey::KEY_F11,
        "F12" => KeyboardKey::KEY_F12,
        _ => return None,
    };
    Some(key)
}
