//! Entity-scoped signal broadcast.
//!
//! The [`SignalHub`] keeps, per entity, an ordered list of boxed
//! [`EntityListener`]s and delivers every broadcast signal to all of them
//! synchronously. Listeners never learn about each other; a physics listener
//! and a camera listener on the same entity only share the signals they
//! exchange.
//!
//! Re-entrancy: a listener reacting to a signal often wants to broadcast a
//! result signal of its own (the controller answers `InputMove` with
//! `PhysicsLocation`). Those re-broadcasts go through the delivery context's
//! outbox: they are appended to the hub's queue and delivered after the
//! in-flight signal has reached every listener, still inside the outer
//! [`SignalHub::broadcast`] call. The original broadcast therefore never
//! skips a listener and nothing recurses into a listener that is already on
//! the call stack.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, World};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::signals::Signal;

/// Capability contract for things that react to entity lifecycle and
/// broadcast events.
///
/// The lifecycle methods default to no-ops; most listeners only care about
/// broadcasts.
pub trait EntityListener {
    /// Called once when the listener is registered against a live entity.
    fn on_entity_exists(&mut self, _entity: Entity) {}

    /// Called when the entity is dropped from the hub, just before the
    /// listener itself is discarded.
    fn on_entity_destroyed(&mut self, _entity: Entity) {}

    /// Called for every signal broadcast against the listener's entity.
    ///
    /// `ctx` gives access to the component store and to re-broadcasting;
    /// the signal itself is borrowed and discarded after delivery.
    fn on_entity_broadcast(&mut self, ctx: &mut SignalCtx<'_>, entity: Entity, signal: &Signal);
}

/// Delivery context handed to [`EntityListener::on_entity_broadcast`].
///
/// Exposes the entity/component store for lookups and an outbox for chained
/// broadcasts. It deliberately does not expose listener registration: the
/// listener set is fixed for the duration of a delivery.
pub struct SignalCtx<'a> {
    /// The entity/component store, for component lookups and writes.
    pub world: &'a mut World,
    outbox: &'a mut VecDeque<(Entity, Signal)>,
}

impl SignalCtx<'_> {
    /// Queue a follow-up broadcast. It is delivered after the signal
    /// currently being dispatched has reached all of its listeners.
    pub fn broadcast(&mut self, entity: Entity, signal: Signal) {
        self.outbox.push_back((entity, signal));
    }
}

type ListenerList = SmallVec<[Box<dyn EntityListener>; 2]>;

/// One-to-many typed broadcast between subsystems bound to the same entity.
#[derive(Default)]
pub struct SignalHub {
    listeners: FxHashMap<Entity, ListenerList>,
    queue: VecDeque<(Entity, Signal)>,
    delivering: bool,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener against `entity`, behind any already registered.
    /// Fires [`EntityListener::on_entity_exists`] on the new listener.
    pub fn register<L>(&mut self, entity: Entity, listener: L)
    where
        L: EntityListener + 'static,
    {
        let mut listener: Box<dyn EntityListener> = Box::new(listener);
        listener.on_entity_exists(entity);
        self.listeners.entry(entity).or_default().push(listener);
    }

    /// Drop every listener registered against `entity`, firing
    /// [`EntityListener::on_entity_destroyed`] on each in registration
    /// order. Entities with no listeners are a silent no-op.
    pub fn drop_entity(&mut self, entity: Entity) {
        if let Some(mut list) = self.listeners.remove(&entity) {
            log::debug!("dropping {} listener(s) for {:?}", list.len(), entity);
            for listener in list.iter_mut() {
                listener.on_entity_destroyed(entity);
            }
        }
    }

    /// Number of listeners currently registered against `entity`.
    pub fn listener_count(&self, entity: Entity) -> usize {
        self.listeners.get(&entity).map_or(0, |l| l.len())
    }

    /// Deliver `signal` to every listener of `entity`, in registration
    /// order, then deliver any broadcasts those listeners queued, until the
    /// queue is dry. No listeners is the normal silent case.
    ///
    /// Re-entrant calls (possible when a layer callback broadcasts while a
    /// delivery is already running further up the call stack) only enqueue;
    /// the outermost call drains everything before returning.
    pub fn broadcast(&mut self, world: &mut World, entity: Entity, signal: Signal) {
        self.queue.push_back((entity, signal));
        if self.delivering {
            return;
        }
        self.delivering = true;
        while let Some((target, signal)) = self.queue.pop_front() {
            log::trace!("signal {} -> {:?}", signal.tag(), target);
            let Self {
                listeners, queue, ..
            } = self;
            if let Some(list) = listeners.get_mut(&target) {
                for listener in list.iter_mut() {
                    let mut ctx = SignalCtx {
                        world: &mut *world,
                        outbox: &mut *queue,
                    };
                    listener.on_entity_broadcast(&mut ctx, target, &signal);
                }
            }
        }
        self.delivering = false;
    }
}
