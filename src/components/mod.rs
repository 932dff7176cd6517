//! ECS components for entities.
//!
//! This module groups the component types that can be attached to entities
//! in the game world. Components are plain data; the signal listeners and
//! the render pass are the ones reading and writing them.
//!
//! Submodules overview:
//! - [`group`] – tag component for grouping entities by name
//! - [`location`] – world-space position for an entity
//! - [`orientation`] – world-space orientation for an entity

pub mod group;
pub mod location;
pub mod orientation;
