//! ECS resources made available to layers and listeners.
//!
//! This module groups the long-lived data injected into the ECS world and
//! reached through the engine context during dispatch: configuration,
//! timing, the camera, window dimensions, and the cross-layer blackboard.
//! Each submodule documents the semantics and intended usage of its
//! resource(s).
//!
//! Overview
//! - `blackboard` – world-global key/value signals for cross-layer state
//! - `camera` – shared 3D camera used by the render pass
//! - `config` – engine settings loaded from `config.ini`
//! - `windowsize` – current window dimensions in pixels
//! - `worldclock` – simulation time and delta
pub mod blackboard;
pub mod camera;
pub mod config;
pub mod windowsize;
pub mod worldclock;
