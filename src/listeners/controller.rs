//! First-person movement controller.
//!
//! Listens for `input-move` intents, grounds them (a walking controller
//! ignores the vertical component of whatever the input side asked for),
//! integrates the absolute location, and answers with `physics-location`,
//! plus `physics-orientation` when the entity actually travelled, so
//! consumers can face it along its motion. Interaction intents are answered
//! with an `animation` signal.
//!
//! This is the canonical producer/consumer chain: the controller consumes
//! intent signals and produces result signals, without knowing who emits
//! the former or reads the latter.

use bevy_ecs::prelude::Entity;
use raylib::prelude::{Quaternion, Vector3};

use crate::signals::{EntityListener, Signal, SignalCtx};

/// Walking-controller listener for a player entity.
pub struct FirstPersonController {
    location: Vector3,
    up: Vector3,
}

impl FirstPersonController {
    /// Create a controller at `start` with the given world up vector.
    pub fn new(start: Vector3, up: Vector3) -> Self {
        Self {
            location: start,
            up,
        }
    }

    /// The controller's current absolute location.
    pub fn location(&self) -> Vector3 {
        self.location
    }

    /// Project a requested displacement onto the ground plane by removing
    /// its component along the up vector.
    fn ground(&self, displacement: Vector3) -> Vector3 {
        let lifted = self.up.scale_by(displacement.dot(self.up));
        displacement - lifted
    }
}

impl EntityListener for FirstPersonController {
    fn on_entity_exists(&mut self, entity: Entity) {
        log::debug!("controller bound to {:?} at {:?}", entity, self.location);
    }

    fn on_entity_broadcast(&mut self, ctx: &mut SignalCtx<'_>, entity: Entity, signal: &Signal) {
        match signal {
            Signal::InputMove { displacement } => {
                let travel = self.ground(*displacement);
                self.location = self.location + travel;
                ctx.broadcast(
                    entity,
                    Signal::PhysicsLocation {
                        location: self.location,
                    },
                );
                if travel.length() > f32::EPSILON {
                    // Yaw-only rotation about the up axis, facing the
                    // direction of travel (-Z is "forward" at yaw zero).
                    let yaw = travel.x.atan2(-travel.z);
                    let half = yaw * 0.5;
                    let orientation = Quaternion {
                        x: self.up.x * half.sin(),
                        y: self.up.y * half.sin(),
                        z: self.up.z * half.sin(),
                        w: half.cos(),
                    };
                    ctx.broadcast(entity, Signal::PhysicsOrientation { orientation });
                }
            }
            Signal::InputInteract => {
                ctx.broadcast(
                    entity,
                    Signal::Animation {
                        clip: "interact".to_string(),
                    },
                );
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
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tape {
        seen: Rc<RefCell<Vec<Signal>>>,
    }

    impl EntityListener for Tape {
        fn on_entity_broadcast(
            &mut self,
            _ctx: &mut SignalCtx<'_>,
            _entity: Entity,
            signal: &Signal,
        ) {
            self.seen.borrow_mut().push(signal.clone());
        }
    }

    const UP: Vector3 = Vector3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    #[test]
    fn test_move_intent_is_grounded_and_answered_with_location() {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        let mut hub = SignalHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        hub.register(
            player,
            FirstPersonController::new(Vector3 { x: 0.0, y: 0.0, z: 0.0 }, UP),
        );
        hub.register(player, Tape { seen: seen.clone() });

        hub.broadcast(
            &mut world,
            player,
            Signal::InputMove {
                displacement: Vector3 {
                    x: 0.0,
                    y: 5.0,
                    z: 3.0,
                },
            },
        );

        // The vertical component is discarded: (0,5,3) projected against a
        // +Y up vector travels (0,0,3).
        let seen = seen.borrow();
        assert_eq!(
            seen.first(),
            Some(&Signal::InputMove {
                displacement: Vector3 {
                    x: 0.0,
                    y: 5.0,
                    z: 3.0
                }
            })
        );
        assert!(seen.contains(&Signal::PhysicsLocation {
            location: Vector3 {
                x: 0.0,
                y: 0.0,
                z: 3.0
            }
        }));
    }

    #[test]
    fn test_locations_accumulate_across_intents() {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        let mut hub = SignalHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        hub.register(
            player,
            FirstPersonController::new(Vector3 { x: 1.0, y: 0.0, z: 0.0 }, UP),
        );
        hub.register(player, Tape { seen: seen.clone() });

        let step = Signal::InputMove {
            displacement: Vector3 {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
        };
        hub.broadcast(&mut world, player, step.clone());
        hub.broadcast(&mut world, player, step);

        let locations: Vec<Vector3> = seen
            .borrow()
            .iter()
            .filter_map(|s| match s {
                Signal::PhysicsLocation { location } => Some(*location),
                _ => None,
            })
            .collect();
        assert_eq!(
            locations,
            vec![
                Vector3 { x: 2.0, y: 0.0, z: 0.0 },
                Vector3 { x: 3.0, y: 0.0, z: 0.0 },
            ]
        );
    }

    #[test]
    fn test_purely_vertical_intent_produces_no_orientation() {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        let mut hub = SignalHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        hub.register(
            player,
            FirstPersonController::new(Vector3 { x: 0.0, y: 0.0, z: 0.0 }, UP),
        );
        hub.register(player, Tape { seen: seen.clone() });

        hub.broadcast(
            &mut world,
            player,
            Signal::InputMove {
                displacement: Vector3 {
                    x: 0.0,
                    y: 2.0,
                    z: 0.0,
                },
            },
        );

        // Location is still reported (unchanged), orientation is not.
        let seen = seen.borrow();
        assert!(seen.contains(&Signal::PhysicsLocation {
            location: Vector3 { x: 0.0, y: 0.0, z: 0.0 }
        }));
        assert!(
            !seen
                .iter()
                .any(|s| matches!(s, Signal::PhysicsOrientation { .. }))
        );
    }

    #[test]
    fn test_interact_intent_becomes_an_animation_cue() {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        let mut hub = SignalHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        hub.register(
            player,
            FirstPersonController::new(Vector3 { x: 0.0, y: 0.0, z: 0.0 }, UP),
        );
        hub.register(player, Tape { seen: seen.clone() });

        hub.broadcast(&mut world, player, Signal::InputInteract);

        assert!(seen.borrow().contains(&Signal::Animation {
            clip: "interact".to_string()
        }));
    }
}
