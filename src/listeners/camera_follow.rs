//! Camera-follow listener.
//!
//! Keeps the shared [`CameraRes`] aimed at its entity: every
//! `physics-location` result moves the camera to the new location plus a
//! fixed offset and points it at the entity. The camera never asks the
//! physics side anything; it only reacts to what gets broadcast.

use bevy_ecs::prelude::Entity;
use raylib::prelude::Vector3;

use crate::resources::camera::CameraRes;
use crate::signals::{EntityListener, Signal, SignalCtx};

/// Third-person follow camera for one entity.
pub struct CameraFollow {
    /// Offset from the entity's location to the camera position.
    pub offset: Vector3,
}

impl CameraFollow {
    pub fn new(offset: Vector3) -> Self {
        Self { offset }
    }
}

impl EntityListener for CameraFollow {
    fn on_entity_broadcast(&mut self, ctx: &mut SignalCtx<'_>, _entity: Entity, signal: &Signal) {
        if let Signal::PhysicsLocation { location } = signal {
            if let Some(mut camera) = ctx.world.get_resource_mut::<CameraRes>() {
                camera.0.position = *location + self.offset;
                camera.0.target = *location;
            }
        }
    }
}
