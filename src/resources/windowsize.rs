//! Window size resource.
//!
//! Tracks the actual window dimensions in pixels. Updated when a resize
//! event comes through the platform pump, so HUD layout code never has to
//! ask the window system directly.

use bevy_ecs::prelude::Resource;

/// Current window size in pixels.
#[derive(Resource, Clone, Copy)]
pub struct WindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
