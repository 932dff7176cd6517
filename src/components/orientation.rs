//! World-space orientation component.

use bevy_ecs::prelude::Component;
use raylib::prelude::Quaternion;

/// World-space orientation of an entity.
///
/// Written by the transform-sync listener when a physics-orientation signal
/// arrives. The render pass only uses the yaw for facing indicators, but the
/// full quaternion is stored so nothing is lost between producer and
/// consumer.
#[derive(Component, Clone, Copy, Debug)]
pub struct Orientation {
    pub quat: Quaternion,
}

impl Orientation {
    /// The identity orientation (no rotation).
    pub fn identity() -> Self {
        Self {
            quat: Quaternion {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                w: 1.0,
            },
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}
