//! Stackable game layers and the dispatch stack.
//!
//! A [`Layer`] is a unit of game structure (the world, a HUD, a pause menu,
//! a debug console) that receives per-frame ticks and input events from the
//! [`LayerStack`]. Layers higher in the stack get first refusal on events
//! and can hide input from the layers below, while every layer keeps
//! ticking: a paused world still animates, it just stops listening.
//!
//! Every capability is a trait method with a no-op default, so a layer only
//! implements what it cares about. Layers are held as [`LayerHandle`]s
//! (`Rc<RefCell<dyn Layer>>`); the handle is the layer's identity, and the
//! caller keeps a clone for later `remove`/`add_above` calls.

pub mod stack;

pub use stack::LayerStack;

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::EngineCtx;
use crate::events::{KeyEvent, MouseButtonEvent, MouseMoveEvent};
use crate::input::InputSnapshot;

/// Shared, identity-carrying handle to a layer.
///
/// Identity is pointer identity (`Rc::ptr_eq`); two handles to the same
/// layer compare equal, clones of different layers never do.
pub type LayerHandle = Rc<RefCell<dyn Layer>>;

/// Wrap a layer value into a [`LayerHandle`].
pub fn into_handle<L>(layer: L) -> LayerHandle
where
    L: Layer + 'static,
{
    Rc::new(RefCell::new(layer))
}

/// What a layer decided during its input-filter step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFilter {
    /// Leave the snapshot for the layers below (possibly after zeroing
    /// individual codes in place).
    #[default]
    Pass,
    /// Hide the whole snapshot from every layer below for the rest of this
    /// tick pass; they receive the blank snapshot instead.
    ConsumeAll,
}

/// The dispatching stack and the identity of the layer being called.
///
/// Handed to every layer callback so a layer can mutate the stack relative
/// to itself, pushing a menu above itself or removing itself, without holding
/// its own handle.
pub struct StackRef<'a> {
    /// The stack performing the dispatch.
    pub stack: &'a LayerStack,
    /// Handle of the layer currently being called.
    pub me: &'a LayerHandle,
}

impl StackRef<'_> {
    /// Insert `layer` immediately above the current layer.
    pub fn push_above_me(&self, ctx: &mut EngineCtx<'_>, layer: LayerHandle) {
        self.stack.add_above(ctx, layer, self.me);
    }

    /// Remove the current layer from the stack.
    pub fn remove_me(&self, ctx: &mut EngineCtx<'_>) {
        self.stack.remove(ctx, self.me);
    }
}

/// A stackable unit receiving per-frame ticks and prioritized input events.
///
/// All methods default to "not interested": lifecycle and tick callbacks do
/// nothing, event handlers return `false` so the event keeps travelling
/// down, and [`Layer::filter_input`] passes the snapshot through untouched.
pub trait Layer {
    /// Name used in stack logging.
    fn name(&self) -> &str {
        "layer"
    }

    /// The layer was inserted into the stack.
    fn on_begin(&mut self, _frame: &StackRef<'_>, _ctx: &mut EngineCtx<'_>) {}

    /// The layer is about to be removed from the stack.
    fn on_end(&mut self, _frame: &StackRef<'_>, _ctx: &mut EngineCtx<'_>) {}

    /// Another layer was inserted somewhere above this one.
    fn on_added_above(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _added: &LayerHandle,
    ) {
    }

    /// A layer somewhere above this one was removed.
    fn on_removed_above(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _removed: &LayerHandle,
    ) {
    }

    /// Advance the layer's simulation by `dt` seconds.
    ///
    /// `input` is the live snapshot, already filtered by the layers above,
    /// or the blank snapshot if one of them consumed everything.
    fn on_tick(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _dt: f32,
        _input: &InputSnapshot,
    ) {
    }

    /// Mask input from the layers below.
    ///
    /// Called after [`Layer::on_tick`], and only while at least one layer
    /// sits below this one (the bottommost layer has nobody to protect, so
    /// its filter step is skipped). Zero individual codes in place for a
    /// partial mask, or return [`InputFilter::ConsumeAll`] to blind
    /// everything below for the rest of the pass.
    fn filter_input(&mut self, _input: &mut InputSnapshot) -> InputFilter {
        InputFilter::Pass
    }

    /// A key or mouse-button code changed state. Return `true` to stop the
    /// event here.
    fn on_keyboard(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _event: &KeyEvent,
    ) -> bool {
        false
    }

    /// Text was typed. Return `true` to stop the event here.
    fn on_text_input(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _text: &str,
    ) -> bool {
        false
    }

    /// The pointer moved. Return `true` to stop the event here.
    fn on_mouse_move(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _event: &MouseMoveEvent,
    ) -> bool {
        false
    }

    /// A mouse button changed state. Return `true` to stop the event here.
    fn on_mouse_button(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _event: &MouseButtonEvent,
    ) -> bool {
        false
    }

    /// The mouse wheel moved. Return `true` to stop the event here.
    fn on_mouse_wheel(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _delta: f32,
    ) -> bool {
        false
    }

    /// The window was resized. Return `true` to stop the event here.
    fn on_window_resized(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _width: i32,
        _height: i32,
    ) -> bool {
        false
    }

    /// The platform asked the application to quit. Return `true` to claim
    /// the request (and, for example, open a confirmation dialog instead).
    fn on_quit(&mut self, _frame: &StackRef<'_>, _ctx: &mut EngineCtx<'_>) -> bool {
        false
    }
}
