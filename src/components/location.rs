//! World-space position component.
//!
//! Written by the transform-sync listener whenever a physics-location signal
//! arrives, read by the render pass and anything else that needs to know
//! where an entity is. Kept separate from
//! [`Orientation`](crate::components::orientation::Orientation) so entities
//! that never rotate don't carry a quaternion around.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// World-space position (in world units) of an entity.
#[derive(Component, Clone, Copy, Debug)]
pub struct Location {
    pub pos: Vector3,
}

impl Location {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3 { x, y, z },
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
