//! Render transform synchronization.
//!
//! Mirrors `physics-location` and `physics-orientation` results into the
//! entity's [`Location`] and [`Orientation`] components, so the render pass
//! reads plain component data and never hears about signals. Entities
//! missing the target component are skipped; that is the normal case for
//! entities that opted out of one half of the transform.

use bevy_ecs::prelude::Entity;

use crate::components::location::Location;
use crate::components::orientation::Orientation;
use crate::signals::{EntityListener, Signal, SignalCtx};

/// Listener copying physics results into render-facing components.
#[derive(Default)]
pub struct TransformSync;

impl EntityListener for TransformSync {
    fn on_entity_broadcast(&mut self, ctx: &mut SignalCtx<'_>, entity: Entity, signal: &Signal) {
        match signal {
            Signal::PhysicsLocation { location } => {
                if let Some(mut loc) = ctx.world.get_mut::<Location>(entity) {
                    loc.pos = *location;
                }
            }
            Signal::PhysicsOrientation { orientation } => {
                if let Some(mut orient) = ctx.world.get_mut::<Orientation>(entity) {
                    orient.quat = *orientation;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalHub;
    use bevy_ecs::prelude::World;
    use raylib::prelude::{Quaternion, Vector3};

    #[test]
    fn test_location_signal_updates_the_component() {
        let mut world = World::new();
        let entity = world
            .spawn((Location::default(), Orientation::default()))
            .id();
        let mut hub = SignalHub::new();
        hub.register(entity, TransformSync);

        hub.broadcast(
            &mut world,
            entity,
            Signal::PhysicsLocation {
                location: Vector3 {
                    x: 4.0,
                    y: 0.0,
                    z: -2.0,
                },
            },
        );

        let loc = world.get::<Location>(entity).unwrap();
        assert_eq!(loc.pos.x, 4.0);
        assert_eq!(loc.pos.z, -2.0);
        // Orientation untouched.
        let orient = world.get::<Orientation>(entity).unwrap();
        assert_eq!(orient.quat.w, 1.0);
    }

    #[test]
    fn test_orientation_signal_updates_the_component() {
        let mut world = World::new();
        let entity = world
            .spawn((Location::default(), Orientation::default()))
            .id();
        let mut hub = SignalHub::new();
        hub.register(entity, TransformSync);

        let quat = Quaternion {
            x: 0.0,
            y: 0.7071,
            z: 0.0,
            w: 0.7071,
        };
        hub.broadcast(
            &mut world,
            entity,
            Signal::PhysicsOrientation { orientation: quat },
        );

        let orient = world.get::<Orientation>(entity).unwrap();
        assert_eq!(orient.quat.y, 0.7071);
    }

    #[test]
    fn test_missing_component_is_a_silent_no_op() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let mut hub = SignalHub::new();
        hub.register(entity, TransformSync);

        hub.broadcast(
            &mut world,
            entity,
            Signal::PhysicsLocation {
                location: Vector3 {
                    x: 1.0,
                    y: 1.0,
                    z: 1.0,
                },
            },
        );

        assert!(world.get::<Location>(entity).is_none());
    }
}
