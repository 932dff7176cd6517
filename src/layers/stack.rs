//! Ordered layer stack with prioritized, blockable dispatch.
//!
//! The stack owns the frame's control flow: every tick and every routed
//! input event enters here and travels top to bottom through the layers.
//! Three rules shape the traversal:
//!
//! - **Events stop at the first taker.** A handler returning `true` hides
//!   the event from every layer below; an event nobody takes is dropped.
//! - **Everybody ticks, not everybody listens.** The tick pass visits every
//!   layer, but a layer may mask parts of the live snapshot (or all of it)
//!   from the layers below, so a covered world keeps animating blind.
//! - **The stack may change under the dispatch.** Layers push and remove
//!   layers from inside their own callbacks. Dispatch iterates over a
//!   snapshot of the handle list, re-checks membership before each visit,
//!   and queues structural ops raised mid-callback, applying them (with
//!   their full lifecycle contract) as soon as the running callback
//!   returns.
//!
//! Structural mistakes (removing a layer that is not in the stack, anchoring
//! above a non-member, double insertion) are programming errors and panic.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::engine::EngineCtx;
use crate::events::{KeyEvent, MouseButtonEvent, MouseMoveEvent};
use crate::input::InputSnapshot;
use crate::layers::{InputFilter, LayerHandle, StackRef};

/// A structural mutation, possibly deferred until the running callback
/// returns.
enum StackOp {
    AddBottom(LayerHandle),
    AddAbove {
        layer: LayerHandle,
        anchor: LayerHandle,
    },
    Remove(LayerHandle),
    RemoveAll,
}

/// Ordered collection of live layers. Index 0 is the bottom, the last entry
/// is the top.
#[derive(Default)]
pub struct LayerStack {
    layers: RefCell<Vec<LayerHandle>>,
    pending: RefCell<SmallVec<[StackOp; 4]>>,
    /// Number of layer callbacks currently on the call stack. While it is
    /// non-zero, structural ops queue instead of applying.
    depth: Cell<u32>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers currently in the stack.
    pub fn len(&self) -> usize {
        self.layers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.borrow().is_empty()
    }

    /// Whether `layer` is currently a member of the stack.
    pub fn contains(&self, layer: &LayerHandle) -> bool {
        self.position(layer).is_some()
    }

    fn position(&self, layer: &LayerHandle) -> Option<usize> {
        self.layers.borrow().iter().position(|l| Rc::ptr_eq(l, layer))
    }

    /// Insert `layer` at the bottom of the stack and fire its
    /// [`on_begin`](crate::layers::Layer::on_begin).
    ///
    /// Panics if `layer` is already a member.
    pub fn add_bottom(&self, ctx: &mut EngineCtx<'_>, layer: LayerHandle) {
        self.submit(ctx, StackOp::AddBottom(layer));
    }

    /// Insert `layer` immediately above `anchor`, fire the new layer's
    /// [`on_begin`](crate::layers::Layer::on_begin), then notify every layer
    /// strictly below the new one, bottom to top, via
    /// [`on_added_above`](crate::layers::Layer::on_added_above).
    ///
    /// Panics if `layer` is already a member or `anchor` is not.
    pub fn add_above(&self, ctx: &mut EngineCtx<'_>, layer: LayerHandle, anchor: &LayerHandle) {
        self.submit(
            ctx,
            StackOp::AddAbove {
                layer,
                anchor: anchor.clone(),
            },
        );
    }

    /// Remove `layer` from the stack: fire its
    /// [`on_end`](crate::layers::Layer::on_end) while it is still a member,
    /// notify every layer below it, bottom to top, via
    /// [`on_removed_above`](crate::layers::Layer::on_removed_above), then
    /// erase it.
    ///
    /// Panics if `layer` is not a member.
    pub fn remove(&self, ctx: &mut EngineCtx<'_>, layer: &LayerHandle) {
        self.submit(ctx, StackOp::Remove(layer.clone()));
    }

    /// Remove every layer, top first, each through the full
    /// [`LayerStack::remove`] contract. A no-op on an empty stack.
    pub fn remove_all(&self, ctx: &mut EngineCtx<'_>) {
        self.submit(ctx, StackOp::RemoveAll);
    }

    /// Queue `op` if a callback is running, otherwise apply it now and then
    /// drain whatever the lifecycle callbacks queued.
    fn submit(&self, ctx: &mut EngineCtx<'_>, op: StackOp) {
        if self.depth.get() > 0 {
            self.pending.borrow_mut().push(op);
            return;
        }
        self.apply(ctx, op);
        self.flush_pending(ctx);
    }

    /// Run one layer callback with the dispatch depth raised, so structural
    /// ops it issues are queued instead of applied under its feet.
    fn invoke<R>(&self, f: impl FnOnce() -> R) -> R {
        self.depth.set(self.depth.get() + 1);
        let result = f();
        self.depth.set(self.depth.get() - 1);
        result
    }

    /// Apply queued structural ops. Only runs between callbacks (depth 0);
    /// ops queued by the lifecycle callbacks of an applied op are picked up
    /// by the next round of the loop.
    fn flush_pending(&self, ctx: &mut EngineCtx<'_>) {
        if self.depth.get() > 0 {
            return;
        }
        loop {
            let ops = std::mem::take(&mut *self.pending.borrow_mut());
            if ops.is_empty() {
                break;
            }
            for op in ops {
                self.apply(ctx, op);
            }
        }
    }

    fn apply(&self, ctx: &mut EngineCtx<'_>, op: StackOp) {
        match op {
            StackOp::AddBottom(layer) => {
                if self.position(&layer).is_some() {
                    panic!("add_bottom: layer '{}' is already in the stack", layer.borrow().name());
                }
                log::debug!("layer '{}' added at the bottom", layer.borrow().name());
                self.layers.borrow_mut().insert(0, layer.clone());
                let frame = StackRef {
                    stack: self,
                    me: &layer,
                };
                self.invoke(|| layer.borrow_mut().on_begin(&frame, ctx));
            }
            StackOp::AddAbove { layer, anchor } => {
                if self.position(&layer).is_some() {
                    panic!("add_above: layer '{}' is already in the stack", layer.borrow().name());
                }
                let Some(anchor_pos) = self.position(&anchor) else {
                    panic!(
                        "add_above: anchor layer '{}' is not in the stack",
                        anchor.borrow().name()
                    );
                };
                let new_index = anchor_pos + 1;
                log::debug!(
                    "layer '{}' added above '{}'",
                    layer.borrow().name(),
                    anchor.borrow().name()
                );
                self.layers.borrow_mut().insert(new_index, layer.clone());
                {
                    let frame = StackRef {
                        stack: self,
                        me: &layer,
                    };
                    self.invoke(|| layer.borrow_mut().on_begin(&frame, ctx));
                }
                for i in 0..new_index {
                    let below = self.layers.borrow()[i].clone();
                    let frame = StackRef {
                        stack: self,
                        me: &below,
                    };
                    self.invoke(|| below.borrow_mut().on_added_above(&frame, ctx, &layer));
                }
            }
            StackOp::Remove(layer) => {
                let Some(pos) = self.position(&layer) else {
                    panic!("remove: layer '{}' is not in the stack", layer.borrow().name());
                };
                log::debug!("layer '{}' removed", layer.borrow().name());
                {
                    let frame = StackRef {
                        stack: self,
                        me: &layer,
                    };
                    self.invoke(|| layer.borrow_mut().on_end(&frame, ctx));
                }
                for i in 0..pos {
                    let below = self.layers.borrow()[i].clone();
                    let frame = StackRef {
                        stack: self,
                        me: &below,
                    };
                    self.invoke(|| below.borrow_mut().on_removed_above(&frame, ctx, &layer));
                }
                self.layers.borrow_mut().remove(pos);
            }
            StackOp::RemoveAll => loop {
                let top = self.layers.borrow().last().cloned();
                match top {
                    Some(layer) => self.apply(ctx, StackOp::Remove(layer)),
                    None => break,
                }
            },
        }
    }

    /// Run the per-frame tick pass, top to bottom.
    ///
    /// `input` is the live snapshot for this frame. Each visited layer ticks
    /// with it and then, while at least one layer remains below, may filter
    /// it: zero individual codes in place (those stay zeroed for the rest of
    /// the pass) or return [`InputFilter::ConsumeAll`], after which every
    /// lower layer receives [`InputSnapshot::BLANK`] instead.
    pub fn tick(&self, ctx: &mut EngineCtx<'_>, dt: f32, input: &mut InputSnapshot) {
        let pass: Vec<LayerHandle> = self.layers.borrow().clone();
        let mut fully_filtered = false;
        for layer in pass.iter().rev() {
            // Skip layers removed earlier in this pass. Layers inserted
            // mid-pass are not in `pass` and wait for the next frame.
            let Some(pos) = self.position(layer) else {
                continue;
            };
            let frame = StackRef {
                stack: self,
                me: layer,
            };
            if fully_filtered {
                self.invoke(|| {
                    layer
                        .borrow_mut()
                        .on_tick(&frame, ctx, dt, &InputSnapshot::BLANK)
                });
            } else {
                self.invoke(|| layer.borrow_mut().on_tick(&frame, ctx, dt, input));
                if pos > 0 {
                    let decision = self.invoke(|| layer.borrow_mut().filter_input(input));
                    if decision == InputFilter::ConsumeAll {
                        fully_filtered = true;
                    }
                }
            }
            self.flush_pending(ctx);
        }
    }

    /// Offer an event to the layers, top to bottom, stopping at the first
    /// handler that returns `true`. Returns whether anyone took it.
    fn route<F>(&self, ctx: &mut EngineCtx<'_>, mut handler: F) -> bool
    where
        F: FnMut(&mut dyn crate::layers::Layer, &StackRef<'_>, &mut EngineCtx<'_>) -> bool,
    {
        let pass: Vec<LayerHandle> = self.layers.borrow().clone();
        for layer in pass.iter().rev() {
            if self.position(layer).is_none() {
                continue;
            }
            let frame = StackRef {
                stack: self,
                me: layer,
            };
            let handled = self.invoke(|| handler(&mut *layer.borrow_mut(), &frame, ctx));
            self.flush_pending(ctx);
            if handled {
                return true;
            }
        }
        false
    }

    /// Route a key/button transition. Unhandled events are dropped.
    pub fn keyboard_event(&self, ctx: &mut EngineCtx<'_>, event: &KeyEvent) -> bool {
        self.route(ctx, |layer, frame, ctx| layer.on_keyboard(frame, ctx, event))
    }

    /// Route typed text. Unhandled text is dropped.
    pub fn text_input(&self, ctx: &mut EngineCtx<'_>, text: &str) -> bool {
        self.route(ctx, |layer, frame, ctx| layer.on_text_input(frame, ctx, text))
    }

    /// Route pointer motion.
    pub fn mouse_move(&self, ctx: &mut EngineCtx<'_>, event: &MouseMoveEvent) -> bool {
        self.route(ctx, |layer, frame, ctx| layer.on_mouse_move(frame, ctx, event))
    }

    /// Route a mouse button transition.
    pub fn mouse_button(&self, ctx: &mut EngineCtx<'_>, event: &MouseButtonEvent) -> bool {
        self.route(ctx, |layer, frame, ctx| {
            layer.on_mouse_button(frame, ctx, event)
        })
    }

    /// Route wheel movement.
    pub fn mouse_wheel(&self, ctx: &mut EngineCtx<'_>, delta: f32) -> bool {
        self.route(ctx, |layer, frame, ctx| layer.on_mouse_wheel(frame, ctx, delta))
    }

    /// Route a window resize.
    pub fn window_resized(&self, ctx: &mut EngineCtx<'_>, width: i32, height: i32) -> bool {
        self.route(ctx, |layer, frame, ctx| {
            layer.on_window_resized(frame, ctx, width, height)
        })
    }

    /// Route a quit request. Returns `true` when some layer claimed it (and
    /// presumably wants the application to stay up).
    pub fn quit_requested(&self, ctx: &mut EngineCtx<'_>) -> bool {
        self.route(ctx, |layer, frame, ctx| layer.on_quit(frame, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputCode;
    use crate::layers::{Layer, into_handle};
    use crate::signals::SignalHub;
    use bevy_ecs::prelude::World;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Configurable test layer that records every callback it receives.
    #[derive(Default)]
    struct Probe {
        tag: &'static str,
        log: Log,
        handle_keys: bool,
        filter: InputFilter,
        clear_on_filter: Option<InputCode>,
        /// Pushed above this layer on the first keyboard event.
        push_on_key: Option<LayerHandle>,
        /// Removed from the stack on the first keyboard event.
        remove_on_key: Option<LayerHandle>,
        /// When set, the layer removes itself on any keyboard event.
        remove_self_on_key: bool,
    }

    impl Probe {
        fn new(tag: &'static str, log: &Log) -> Self {
            Probe {
                tag,
                log: log.clone(),
                ..Probe::default()
            }
        }

        fn push(&self, entry: String) {
            self.log.borrow_mut().push(entry);
        }
    }

    impl Layer for Probe {
        fn name(&self) -> &str {
            self.tag
        }

        fn on_begin(&mut self, _frame: &StackRef<'_>, _ctx: &mut EngineCtx<'_>) {
            self.push(format!("{}:begin", self.tag));
        }

        fn on_end(&mut self, _frame: &StackRef<'_>, _ctx: &mut EngineCtx<'_>) {
            self.push(format!("{}:end", self.tag));
        }

        fn on_added_above(
            &mut self,
            _frame: &StackRef<'_>,
            _ctx: &mut EngineCtx<'_>,
            added: &LayerHandle,
        ) {
            self.push(format!("{}:added_above({})", self.tag, added.borrow().name()));
        }

        fn on_removed_above(
            &mut self,
            _frame: &StackRef<'_>,
            _ctx: &mut EngineCtx<'_>,
            removed: &LayerHandle,
        ) {
            self.push(format!(
                "{}:removed_above({})",
                self.tag,
                removed.borrow().name()
            ));
        }

        fn on_tick(
            &mut self,
            _frame: &StackRef<'_>,
            _ctx: &mut EngineCtx<'_>,
            _dt: f32,
            input: &InputSnapshot,
        ) {
            self.push(format!(
                "{}:tick(w={})",
                self.tag,
                input.is_pressed(InputCode::KeyW)
            ));
        }

        fn filter_input(&mut self, input: &mut InputSnapshot) -> InputFilter {
            if let Some(code) = self.clear_on_filter {
                input.clear(code);
            }
            self.push(format!("{}:filter", self.tag));
            self.filter
        }

        fn on_keyboard(
            &mut self,
            frame: &StackRef<'_>,
            ctx: &mut EngineCtx<'_>,
            event: &KeyEvent,
        ) -> bool {
            self.push(format!("{}:key({:?})", self.tag, event.code));
            if let Some(layer) = self.push_on_key.take() {
                frame.push_above_me(ctx, layer);
            }
            if let Some(layer) = self.remove_on_key.take() {
                frame.stack.remove(ctx, &layer);
            }
            if self.remove_self_on_key {
                frame.remove_me(ctx);
            }
            self.handle_keys
        }
    }

    fn ctx_parts() -> (World, SignalHub) {
        (World::new(), SignalHub::new())
    }

    fn key_w() -> KeyEvent {
        KeyEvent {
            code: InputCode::KeyW,
            pressed: true,
        }
    }

    #[test]
    fn test_insertion_order_and_lifecycle_callbacks() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let a = into_handle(Probe::new("a", &log));
        let b = into_handle(Probe::new("b", &log));
        let c = into_handle(Probe::new("c", &log));

        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, b.clone(), &a);
        stack.add_above(&mut ctx, c.clone(), &b);

        assert_eq!(stack.len(), 3);
        assert!(stack.contains(&a) && stack.contains(&b) && stack.contains(&c));
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "a:begin".to_string(),
                "b:begin".to_string(),
                "a:added_above(b)".to_string(),
                "c:begin".to_string(),
                "a:added_above(c)".to_string(),
                "b:added_above(c)".to_string(),
            ]
        );

        log.borrow_mut().clear();
        stack.remove(&mut ctx, &b);
        assert_eq!(stack.len(), 2);
        assert!(!stack.contains(&b));
        assert_eq!(
            log.borrow().as_slice(),
            &["b:end".to_string(), "a:removed_above(b)".to_string()]
        );
    }

    #[test]
    fn test_add_above_inserts_in_the_middle() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let a = into_handle(Probe::new("a", &log));
        let c = into_handle(Probe::new("c", &log));
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, c.clone(), &a);

        // Insert between a and c; only a is below the new layer.
        let b = into_handle(Probe::new("b", &log));
        log.borrow_mut().clear();
        stack.add_above(&mut ctx, b.clone(), &a);
        assert_eq!(
            log.borrow().as_slice(),
            &["b:begin".to_string(), "a:added_above(b)".to_string()]
        );

        // Top-down event order proves the resulting stack order: c, b, a.
        log.borrow_mut().clear();
        stack.keyboard_event(&mut ctx, &key_w());
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "c:key(KeyW)".to_string(),
                "b:key(KeyW)".to_string(),
                "a:key(KeyW)".to_string(),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "not in the stack")]
    fn test_add_above_unknown_anchor_panics() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();
        let member = into_handle(Probe::new("member", &log));
        let stranger = into_handle(Probe::new("stranger", &log));
        stack.add_above(&mut ctx, member, &stranger);
    }

    #[test]
    #[should_panic(expected = "not in the stack")]
    fn test_remove_non_member_panics() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();
        let stranger = into_handle(Probe::new("stranger", &log));
        stack.remove(&mut ctx, &stranger);
    }

    #[test]
    #[should_panic(expected = "already in the stack")]
    fn test_double_insertion_panics() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();
        let a = into_handle(Probe::new("a", &log));
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_bottom(&mut ctx, a);
    }

    #[test]
    fn test_tick_full_filter_blinds_lower_layers() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let a = into_handle(Probe::new("a", &log));
        let b = into_handle(Probe {
            filter: InputFilter::ConsumeAll,
            ..Probe::new("b", &log)
        });
        let c = into_handle(Probe::new("c", &log));
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, b.clone(), &a);
        stack.add_above(&mut ctx, c.clone(), &b);
        log.borrow_mut().clear();

        let mut input = InputSnapshot::default();
        input.set_pressed(InputCode::KeyW, true);
        stack.tick(&mut ctx, 0.016, &mut input);

        // c and b see the live snapshot; b consumes everything, so a ticks
        // with the blank snapshot and is never offered a filter step.
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "c:tick(w=true)".to_string(),
                "c:filter".to_string(),
                "b:tick(w=true)".to_string(),
                "b:filter".to_string(),
                "a:tick(w=false)".to_string(),
            ]
        );
        // The live snapshot itself is untouched by a full filter.
        assert!(input.is_pressed(InputCode::KeyW));
    }

    #[test]
    fn test_tick_partial_filter_persists_down_the_pass() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let a = into_handle(Probe::new("a", &log));
        let b = into_handle(Probe::new("b", &log));
        let c = into_handle(Probe {
            clear_on_filter: Some(InputCode::KeyW),
            ..Probe::new("c", &log)
        });
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, b.clone(), &a);
        stack.add_above(&mut ctx, c.clone(), &b);
        log.borrow_mut().clear();

        let mut input = InputSnapshot::default();
        input.set_pressed(InputCode::KeyW, true);
        stack.tick(&mut ctx, 0.016, &mut input);

        // c sees W pressed, zeroes it; both b and a then see it released.
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "c:tick(w=true)".to_string(),
                "c:filter".to_string(),
                "b:tick(w=false)".to_string(),
                "b:filter".to_string(),
                "a:tick(w=false)".to_string(),
            ]
        );
        assert!(!input.is_pressed(InputCode::KeyW));
    }

    #[test]
    fn test_bottom_layer_is_not_offered_a_filter_step() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();
        let only = into_handle(Probe {
            filter: InputFilter::ConsumeAll,
            ..Probe::new("only", &log)
        });
        stack.add_bottom(&mut ctx, only);
        log.borrow_mut().clear();

        let mut input = InputSnapshot::default();
        stack.tick(&mut ctx, 0.016, &mut input);
        assert_eq!(log.borrow().as_slice(), &["only:tick(w=false)".to_string()]);
    }

    #[test]
    fn test_event_stops_at_first_handler() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let a = into_handle(Probe::new("a", &log));
        let b = into_handle(Probe {
            handle_keys: true,
            ..Probe::new("b", &log)
        });
        let c = into_handle(Probe::new("c", &log));
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, b.clone(), &a);
        stack.add_above(&mut ctx, c.clone(), &b);
        log.borrow_mut().clear();

        let event = KeyEvent {
            code: InputCode::Escape,
            pressed: true,
        };
        let handled = stack.keyboard_event(&mut ctx, &event);

        // c declines, b takes it, a never hears about it.
        assert!(handled);
        assert_eq!(
            log.borrow().as_slice(),
            &["c:key(Escape)".to_string(), "b:key(Escape)".to_string()]
        );
    }

    #[test]
    fn test_unhandled_event_reaches_everyone_and_reports_false() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();
        let a = into_handle(Probe::new("a", &log));
        let b = into_handle(Probe::new("b", &log));
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, b, &a);
        log.borrow_mut().clear();

        assert!(!stack.keyboard_event(&mut ctx, &key_w()));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_remove_all_unwinds_from_the_top() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();
        let a = into_handle(Probe::new("a", &log));
        let b = into_handle(Probe::new("b", &log));
        let c = into_handle(Probe::new("c", &log));
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, b.clone(), &a);
        stack.add_above(&mut ctx, c.clone(), &b);
        log.borrow_mut().clear();

        stack.remove_all(&mut ctx);

        assert!(stack.is_empty());
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "c:end".to_string(),
                "a:removed_above(c)".to_string(),
                "b:removed_above(c)".to_string(),
                "b:end".to_string(),
                "a:removed_above(b)".to_string(),
                "a:end".to_string(),
            ]
        );

        // Idempotent: nothing fires on an already-empty stack.
        log.borrow_mut().clear();
        stack.remove_all(&mut ctx);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_layer_can_push_above_itself_mid_event() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let menu = into_handle(Probe::new("menu", &log));
        let game = into_handle(Probe {
            push_on_key: Some(menu.clone()),
            handle_keys: true,
            ..Probe::new("game", &log)
        });
        stack.add_bottom(&mut ctx, game.clone());
        log.borrow_mut().clear();

        stack.keyboard_event(&mut ctx, &key_w());

        // The push happens after the handler returns; the new layer's
        // lifecycle fires exactly once and the pusher hears about it.
        assert!(stack.contains(&menu));
        assert_eq!(stack.len(), 2);
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "game:key(KeyW)".to_string(),
                "menu:begin".to_string(),
                "game:added_above(menu)".to_string(),
            ]
        );

        // Next event goes to the menu first.
        log.borrow_mut().clear();
        stack.keyboard_event(&mut ctx, &key_w());
        assert_eq!(log.borrow().first().unwrap(), "menu:key(KeyW)");
    }

    #[test]
    fn test_layer_can_remove_itself_mid_event() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let a = into_handle(Probe::new("a", &log));
        let c = into_handle(Probe {
            remove_self_on_key: true,
            ..Probe::new("c", &log)
        });
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, c.clone(), &a);
        log.borrow_mut().clear();

        stack.keyboard_event(&mut ctx, &key_w());

        // c declined the event, so a still receives it, after c's removal
        // has fully played out.
        assert!(!stack.contains(&c));
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "c:key(KeyW)".to_string(),
                "c:end".to_string(),
                "a:removed_above(c)".to_string(),
                "a:key(KeyW)".to_string(),
            ]
        );
    }

    #[test]
    fn test_layer_removed_mid_pass_is_skipped() {
        let (mut world, mut signals) = ctx_parts();
        let mut ctx = EngineCtx {
            world: &mut world,
            signals: &mut signals,
        };
        let log: Log = Log::default();
        let stack = LayerStack::new();

        let a = into_handle(Probe::new("a", &log));
        let b = into_handle(Probe::new("b", &log));
        let c = into_handle(Probe {
            remove_on_key: Some(b.clone()),
            ..Probe::new("c", &log)
        });
        stack.add_bottom(&mut ctx, a.clone());
        stack.add_above(&mut ctx, b.clone(), &a);
        stack.add_above(&mut ctx, c.clone(), &b);
        log.borrow_mut().clear();

        stack.keyboard_event(&mut ctx, &key_w());

        // b was removed by c's handler before the traversal reached it; the
        // event skips straight to a.
        assert_eq!(
            log.borrow().as_slice(),
            &[
                "c:key(KeyW)".to_string(),
                "b:end".to_string(),
                "a:removed_above(b)".to_string(),
                "a:key(KeyW)".to_string(),
            ]
        );
    }
}
