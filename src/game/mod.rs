//! Demo scene assembly.
//!
//! Builds the walking-cube playground: the player entity with its listener
//! chain, a handful of props, the background audio, and the initial layer
//! stack (HUD at the bottom, the world above it; pause menu and debug
//! console are pushed on top at runtime by the world layer).
//!
//! Submodules:
//! - [`hud_layer`] – bottom layer, status line and coverage tracking
//! - [`world_layer`] – gameplay: input intents, pause/console toggles
//! - [`pause_layer`] – modal overlay consuming all input while open
//! - [`console_layer`] – debug console with partial key filtering

pub mod console_layer;
pub mod hud_layer;
pub mod pause_layer;
pub mod world_layer;

use raylib::prelude::Vector3;

use crate::audio::{AudioBridge, AudioCmd};
use crate::components::group::Group;
use crate::components::location::Location;
use crate::components::orientation::Orientation;
use crate::engine::EngineCtx;
use crate::layers::{LayerStack, into_handle};
use crate::listeners::audio_cue::AudioCue;
use crate::listeners::camera_follow::CameraFollow;
use crate::listeners::controller::FirstPersonController;
use crate::listeners::transform_sync::TransformSync;
use crate::resources::config::EngineConfig;
use crate::signals::Signal;

use console_layer::ConsoleLayer;
use hud_layer::HudLayer;
use world_layer::WorldLayer;

const PLAYER_START: Vector3 = Vector3 {
    x: 0.0,
    y: 0.5,
    z: 0.0,
};

const WORLD_UP: Vector3 = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

const CAMERA_OFFSET: Vector3 = Vector3 {
    x: 0.0,
    y: 6.0,
    z: 8.0,
};

/// Spawn the demo scene into the engine. Passed to
/// [`Engine::setup`](crate::engine::Engine::setup).
pub fn build(stack: &LayerStack, ctx: &mut EngineCtx<'_>) {
    let config = ctx.world.resource::<EngineConfig>().clone();

    // Player entity and its listener chain. The controller must come first
    // so its results exist before anyone else could want them, but note the
    // ordering only matters within one signal's delivery round.
    let player = ctx
        .world
        .spawn((
            Location { pos: PLAYER_START },
            Orientation::identity(),
            Group::new("player"),
        ))
        .id();
    ctx.blackboard().set_entity("player", player);

    ctx.signals
        .register(player, FirstPersonController::new(PLAYER_START, WORLD_UP));
    ctx.signals.register(player, TransformSync);
    ctx.signals.register(player, CameraFollow::new(CAMERA_OFFSET));
    ctx.signals.register(player, AudioCue);

    // Scatter some props to walk around.
    for _ in 0..12 {
        let x = fastrand::f32() * 16.0 - 8.0;
        let z = fastrand::f32() * 16.0 - 8.0;
        ctx.world
            .spawn((Location::new(x, 0.5, z), Group::new("prop")));
    }

    // Background audio; missing assets degrade to logged load failures.
    if let Some(bridge) = ctx.world.get_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::LoadFx {
            id: "interact".to_string(),
            path: "assets/sfx/interact.wav".to_string(),
        });
        let _ = bridge.tx_cmd.send(AudioCmd::LoadMusic {
            id: "ambient".to_string(),
            path: "assets/music/ambient.ogg".to_string(),
        });
        let _ = bridge.tx_cmd.send(AudioCmd::PlayMusic {
            id: "ambient".to_string(),
            looped: true,
        });
    }

    // Initial stack, bottom to top: HUD, world. The world layer owns the
    // console handle so F1 can toggle it.
    let hud = into_handle(HudLayer::default());
    let console = into_handle(ConsoleLayer::default());
    let world_layer = into_handle(WorldLayer::new(player, console, &config));
    stack.add_bottom(ctx, hud.clone());
    stack.add_above(ctx, world_layer, &hud);

    // Settle the camera onto the player before the first frame.
    ctx.broadcast(player, Signal::PhysicsLocation {
        location: PLAYER_START,
    });

    log::info!("scene ready: player {:?}, {} layers", player, stack.len());
}
