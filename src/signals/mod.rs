//! Typed entity signals and the broadcast hub.
//!
//! A [`Signal`] is an immutable tagged message broadcast against one entity
//! and delivered to every listener registered for that entity, in
//! registration order. Signals are how the gameplay, physics, camera and
//! audio sides of the engine talk to each other without depending on each
//! other's types: the gameplay layer emits movement intents, the controller
//! listener turns them into locations, and whoever cares about locations
//! (render sync, camera follow) reacts in turn.
//!
//! Each tag has one producing role by convention:
//! - `InputMove` / `InputInteract` come from the input/gameplay side,
//! - `PhysicsLocation` / `PhysicsOrientation` come from the motion side,
//! - `Animation` comes from whatever drives animation state changes.
//!
//! The convention is documented, not enforced; any listener may consume any
//! tag.

pub mod hub;

pub use hub::{EntityListener, SignalCtx, SignalHub};

use raylib::prelude::{Quaternion, Vector3};

/// An immutable, entity-scoped broadcast message.
///
/// The set of tags is closed on purpose: payload access is an exhaustive
/// `match`, so a new tag is a compile-visible change at every consumer that
/// cares.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Requested displacement for this entity, already scaled to the frame.
    InputMove {
        /// World-space displacement the input side wants applied.
        displacement: Vector3,
    },
    /// The entity was asked to interact with whatever it is facing.
    InputInteract,
    /// The entity's absolute location was recomputed.
    PhysicsLocation {
        /// New world-space location.
        location: Vector3,
    },
    /// The entity's orientation was recomputed.
    PhysicsOrientation {
        /// New world-space orientation.
        orientation: Quaternion,
    },
    /// An animation state change for this entity.
    Animation {
        /// Name of the clip to play.
        clip: String,
    },
}

impl Signal {
    /// Short tag name, for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            Signal::InputMove { .. } => "input-move",
            Signal::InputInteract => "input-interact",
            Signal::PhysicsLocation { .. } => "physics-location",
            Signal::PhysicsOrientation { .. } => "physics-orientation",
            Signal::Animation { .. } => "animation",
        }
    }
}
