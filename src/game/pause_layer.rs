//! Modal pause overlay.
//!
//! While this layer sits on the stack, everything below it is blind: the
//! filter step consumes the whole snapshot, so the world keeps ticking (and
//! animating) but receives no input, and every discrete event short of
//! pointer motion stops here. Escape removes the layer again; a layer
//! removing itself from inside its own handler is the normal way modal
//! overlays close.

use crate::engine::EngineCtx;
use crate::events::{KeyEvent, MouseButtonEvent};
use crate::input::{InputCode, InputSnapshot};
use crate::layers::{InputFilter, Layer, StackRef};

/// Pause menu layer. Stateless; the blackboard `paused` flag is the only
/// thing it leaves behind, and the render pass draws the overlay from it.
#[derive(Default)]
pub struct PauseLayer;

impl Layer for PauseLayer {
    fn name(&self) -> &str {
        "pause"
    }

    fn on_begin(&mut self, _frame: &StackRef<'_>, ctx: &mut EngineCtx<'_>) {
        ctx.blackboard().set_flag("paused");
        log::info!("paused");
    }

    fn on_end(&mut self, _frame: &StackRef<'_>, ctx: &mut EngineCtx<'_>) {
        ctx.blackboard().clear_flag("paused");
        log::info!("resumed");
    }

    fn filter_input(&mut self, _input: &mut InputSnapshot) -> InputFilter {
        InputFilter::ConsumeAll
    }

    fn on_keyboard(
        &mut self,
        frame: &StackRef<'_>,
        ctx: &mut EngineCtx<'_>,
        event: &KeyEvent,
    ) -> bool {
        if event.is_press(InputCode::Escape) {
            frame.remove_me(ctx);
        }
        true
    }

    fn on_text_input(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _text: &str,
    ) -> bool {
        true
    }

    fn on_mouse_button(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _event: &MouseButtonEvent,
    ) -> bool {
        true
    }

    fn on_mouse_wheel(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _delta: f32,
    ) -> bool {
        true
    }
}
