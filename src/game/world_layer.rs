//! Gameplay layer.
//!
//! Reads the filtered snapshot each tick and turns it into entity intents:
//! WASD (rotated into the current mouse-look yaw) plus Space become an
//! `input-move` broadcast, E becomes `input-interact`. The layer never
//! moves anything itself; the controller listener decides what the intent
//! does to the entity.
//!
//! It also owns the meta keys: Escape pushes a fresh pause layer above
//! itself, F1 opens the debug console, F11 toggles the FPS readout.

use bevy_ecs::prelude::Entity;
use raylib::prelude::Vector3;

use crate::engine::EngineCtx;
use crate::events::KeyEvent;
use crate::input::{InputCode, InputSnapshot};
use crate::layers::{Layer, LayerHandle, StackRef, into_handle};
use crate::resources::config::EngineConfig;
use crate::signals::Signal;

use super::pause_layer::PauseLayer;

/// The playable world: translates input into signals for the player entity.
pub struct WorldLayer {
    player: Entity,
    console: LayerHandle,
    yaw: f32,
    move_speed: f32,
    mouse_sensitivity: f32,
}

impl WorldLayer {
    pub fn new(player: Entity, console: LayerHandle, config: &EngineConfig) -> Self {
        Self {
            player,
            console,
            yaw: 0.0,
            move_speed: config.move_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }

    /// Direction the pressed movement keys ask for, in the layer's local
    /// frame (-Z forward, +X right, +Y up).
    fn wish_direction(input: &InputSnapshot) -> Vector3 {
        let mut wish = Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        if input.is_pressed(InputCode::KeyW) {
            wish.z -= 1.0;
        }
        if input.is_pressed(InputCode::KeyS) {
            wish.z += 1.0;
        }
        if input.is_pressed(InputCode::KeyA) {
            wish.x -= 1.0;
        }
        if input.is_pressed(InputCode::KeyD) {
            wish.x += 1.0;
        }
        if input.is_pressed(InputCode::Space) {
            // The walking controller grounds this away; a flying one
            // would honor it.
            wish.y += 1.0;
        }
        wish
    }
}

impl Layer for WorldLayer {
    fn name(&self) -> &str {
        "world"
    }

    fn on_begin(&mut self, _frame: &StackRef<'_>, _ctx: &mut EngineCtx<'_>) {
        log::info!("world layer active");
    }

    fn on_tick(
        &mut self,
        _frame: &StackRef<'_>,
        ctx: &mut EngineCtx<'_>,
        dt: f32,
        input: &InputSnapshot,
    ) {
        self.yaw += input.mouse_delta.x * self.mouse_sensitivity;

        let mut wish = Self::wish_direction(input);
        if wish.length() == 0.0 {
            return;
        }
        if wish.length() > 1.0 {
            wish = wish.normalized();
        }

        // Rotate the wish into the mouse-look frame (yaw about +Y).
        let (sin, cos) = self.yaw.sin_cos();
        let displacement = Vector3 {
            x: wish.x * cos + wish.z * sin,
            y: wish.y,
            z: -wish.x * sin + wish.z * cos,
        }
        .scale_by(self.move_speed * dt);

        ctx.broadcast(self.player, Signal::InputMove { displacement });
    }

    fn on_keyboard(
        &mut self,
        frame: &StackRef<'_>,
        ctx: &mut EngineCtx<'_>,
        event: &KeyEvent,
    ) -> bool {
        if event.is_press(InputCode::Escape) {
            frame.push_above_me(ctx, into_handle(PauseLayer::default()));
            return true;
        }
        if event.is_press(InputCode::F1) {
            if !frame.stack.contains(&self.console) {
                frame.push_above_me(ctx, self.console.clone());
            }
            return true;
        }
        if event.is_press(InputCode::KeyE) {
            ctx.broadcast(self.player, Signal::InputInteract);
            return true;
        }
        if event.is_press(InputCode::F11) {
            let mut blackboard = ctx.blackboard();
            if blackboard.has_flag("show_fps") {
                blackboard.clear_flag("show_fps");
            } else {
                blackboard.set_flag("show_fps");
            }
            return true;
        }
        false
    }
}
