//! Shared 3D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera3D`] so the camera-follow
//! listener and the render pass agree on a single view transform. Update
//! this resource to move the view.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};

/// ECS resource that holds the active 3D camera parameters.
///
/// Inserted during setup, written by camera-controller listeners, and read
/// by the render pass each frame.
#[derive(Resource)]
pub struct CameraRes(pub Camera3D);

impl Default for CameraRes {
    fn default() -> Self {
        Self(Camera3D::perspective(
            Vector3 {
                x: 0.0,
                y: 6.0,
                z: 8.0,
            },
            Vector3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            Vector3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
            60.0,
        ))
    }
}
