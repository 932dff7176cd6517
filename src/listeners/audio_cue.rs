//! Audio cue listener.
//!
//! Turns interaction and animation signals into fire-and-forget sound
//! commands for the audio thread. Runs happily without the bridge resource
//! (headless tests); signals are then simply ignored.

use bevy_ecs::prelude::Entity;

use crate::audio::{AudioBridge, AudioCmd};
use crate::signals::{EntityListener, Signal, SignalCtx};

/// Listener forwarding entity signals to the audio thread as cues.
#[derive(Default)]
pub struct AudioCue;

impl AudioCue {
    fn play(&self, ctx: &mut SignalCtx<'_>, id: &str) {
        if let Some(bridge) = ctx.world.get_resource::<AudioBridge>() {
            let _ = bridge.tx_cmd.send(AudioCmd::PlayFx { id: id.to_string() });
        }
    }
}

impl EntityListener for AudioCue {
    fn on_entity_broadcast(&mut self, ctx: &mut SignalCtx<'_>, _entity: Entity, signal: &Signal) {
        match signal {
            Signal::InputInteract => self.play(ctx, "interact"),
            Signal::Animation { clip } => self.play(ctx, clip),
            _ => {}
        }
    }
}
