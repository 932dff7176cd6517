//! Entity signal listeners.
//!
//! Each listener implements the
//! [`EntityListener`](crate::signals::EntityListener) contract and reacts to
//! a slice of the signal traffic on its entity:
//!
//! - [`controller`] – turns movement intents into locations and
//!   orientations (the "physics" role for a walking player)
//! - [`transform_sync`] – mirrors physics results into the render-facing
//!   components
//! - [`camera_follow`] – keeps the camera glued to an entity's location
//! - [`audio_cue`] – forwards interaction and animation signals to the
//!   audio thread as sound cues
//!
//! Registration order matters: listeners registered first see each signal
//! first, and a listener's re-broadcast is delivered to everyone only after
//! the current signal finishes its round.

pub mod audio_cue;
pub mod camera_follow;
pub mod controller;
pub mod transform_sync;
