//! HUD layer.
//!
//! Lives at the bottom of the stack. Every tick it refreshes the status
//! line on the blackboard (smoothed FPS plus the player's location read
//! straight from the component store) for the render pass to draw. The
//! neighbor notifications keep a count of layers sitting above it, so the
//! status line can say when the world is covered by an overlay.

use crate::components::location::Location;
use crate::engine::EngineCtx;
use crate::input::InputSnapshot;
use crate::layers::{Layer, LayerHandle, StackRef};
use crate::resources::blackboard::Blackboard;

/// Bottom-of-stack status layer.
#[derive(Default)]
pub struct HudLayer {
    covered_by: u32,
    fps_smooth: f32,
}

impl Layer for HudLayer {
    fn name(&self) -> &str {
        "hud"
    }

    fn on_added_above(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _added: &LayerHandle,
    ) {
        self.covered_by += 1;
    }

    fn on_removed_above(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        _removed: &LayerHandle,
    ) {
        self.covered_by = self.covered_by.saturating_sub(1);
    }

    fn on_tick(
        &mut self,
        _frame: &StackRef<'_>,
        ctx: &mut EngineCtx<'_>,
        dt: f32,
        input: &InputSnapshot,
    ) {
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps_smooth = if self.fps_smooth == 0.0 {
                instant
            } else {
                self.fps_smooth * 0.95 + instant * 0.05
            };
        }

        let player = ctx
            .world
            .resource::<Blackboard>()
            .get_entity("player")
            .copied();
        let location = match player {
            Some(p) => ctx.world.get::<Location>(p).map(|l| l.pos),
            None => None,
        };

        let mut status = match location {
            Some(pos) => format!(
                "{:>4.0} fps | pos {:.1} {:.1} {:.1}",
                self.fps_smooth, pos.x, pos.y, pos.z
            ),
            None => format!("{:>4.0} fps", self.fps_smooth),
        };
        if self.covered_by > 1 {
            status.push_str(" | covered");
        }
        if ctx.world.resource::<Blackboard>().has_flag("show_input") {
            // Note: this is the HUD's view, i.e. after the layers above had
            // their turn at filtering.
            for code in input.pressed_codes() {
                status.push(' ');
                status.push_str(code.name());
            }
        }
        ctx.blackboard().set_string("hud_status", status);
    }

    fn on_window_resized(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        width: i32,
        height: i32,
    ) -> bool {
        // Nothing above wanted it; the HUD re-anchors and claims it.
        log::debug!("hud layout refreshed for {}x{}", width, height);
        true
    }

    fn on_quit(&mut self, _frame: &StackRef<'_>, _ctx: &mut EngineCtx<'_>) -> bool {
        log::info!("quit requested");
        false
    }
}
