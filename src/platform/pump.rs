//! Per-frame input pump.
//!
//! Called once at the top of every frame: refreshes the live
//! [`InputSnapshot`] from the polled device state and collects the
//! edge-triggered [`PlatformEvent`]s for the engine to route through the
//! layer stack. Raw platform identifiers never leave this module: by the
//! time anything downstream sees input, it speaks [`InputCode`].

use raylib::prelude::RaylibHandle;

use crate::events::{KeyEvent, MouseButtonEvent, MouseMoveEvent};
use crate::input::InputSnapshot;
use crate::platform::keymap::Keymap;

/// One frame's worth of discrete platform events, in the order they should
/// be routed.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    Key(KeyEvent),
    Text(String),
    MouseMove(MouseMoveEvent),
    MouseButton(MouseButtonEvent),
    MouseWheel(f32),
    Resized(i32, i32),
}

/// Poll the window system, refresh `snapshot` in place, and return the
/// events that fired this frame.
pub fn poll(
    rl: &mut RaylibHandle,
    keymap: &Keymap,
    snapshot: &mut InputSnapshot,
) -> Vec<PlatformEvent> {
    let mut events = Vec::new();

    for (code, key) in keymap.keys() {
        snapshot.set_pressed(*code, rl.is_key_down(*key));
        if rl.is_key_pressed(*key) {
            events.push(PlatformEvent::Key(KeyEvent {
                code: *code,
                pressed: true,
            }));
        }
        if rl.is_key_released(*key) {
            events.push(PlatformEvent::Key(KeyEvent {
                code: *code,
                pressed: false,
            }));
        }
    }

    let position = rl.get_mouse_position();
    for (code, button) in keymap.buttons() {
        snapshot.set_pressed(*code, rl.is_mouse_button_down(*button));
        if rl.is_mouse_button_pressed(*button) {
            events.push(PlatformEvent::MouseButton(MouseButtonEvent {
                button: *code,
                pressed: true,
                position,
            }));
        }
        if rl.is_mouse_button_released(*button) {
            events.push(PlatformEvent::MouseButton(MouseButtonEvent {
                button: *code,
                pressed: false,
                position,
            }));
        }
    }

    let delta = rl.get_mouse_delta();
    snapshot.mouse_position = position;
    snapshot.mouse_delta = delta;
    if delta.x != 0.0 || delta.y != 0.0 {
        events.push(PlatformEvent::MouseMove(MouseMoveEvent { position, delta }));
    }

    let wheel = rl.get_mouse_wheel_move();
    snapshot.wheel_move = wheel;
    if wheel != 0.0 {
        events.push(PlatformEvent::MouseWheel(wheel));
    }

    let mut text = String::new();
    while let Some(c) = rl.get_char_pressed() {
        if !c.is_control() {
            text.push(c);
        }
    }
    if !text.is_empty() {
        events.push(PlatformEvent::Text(text));
    }

    if rl.is_window_resized() {
        events.push(PlatformEvent::Resized(
            rl.get_screen_width(),
            rl.get_screen_height(),
        ));
    }

    events
}
