//! Debug console layer.
//!
//! Sits above the world and captures typed text into a command line. Unlike
//! the pause overlay it filters selectively: movement keys are zeroed out of
//! the live snapshot (typing "wasd" must not walk the player) while the
//! mouse passes through, so the world below keeps looking around.
//!
//! Commands:
//! - `quit` – raise the blackboard quit flag
//! - `fps` – toggle the FPS readout
//! - `input` – toggle the pressed-keys readout on the HUD
//! - `set <key> <value>` – write a blackboard scalar
//! - `timescale <value>` – slow down or speed up the world clock

use crate::engine::EngineCtx;
use crate::events::KeyEvent;
use crate::input::{InputCode, InputSnapshot};
use crate::layers::{InputFilter, Layer, StackRef};
use crate::resources::worldclock::WorldClock;

/// Keys hidden from the world while the console is open.
const FILTERED_CODES: [InputCode; 9] = [
    InputCode::KeyW,
    InputCode::KeyA,
    InputCode::KeyS,
    InputCode::KeyD,
    InputCode::KeyE,
    InputCode::KeyQ,
    InputCode::KeyR,
    InputCode::KeyF,
    InputCode::Space,
];

/// Text-command console. Toggled with F1.
#[derive(Default)]
pub struct ConsoleLayer {
    line: String,
}

impl ConsoleLayer {
    fn execute(&mut self, ctx: &mut EngineCtx<'_>) {
        let line = self.line.trim().to_string();
        let mut words = line.split_whitespace();
        match words.next() {
            None => {}
            Some("quit") => {
                ctx.blackboard().set_flag("quit");
            }
            Some("fps") => {
                let mut blackboard = ctx.blackboard();
                if blackboard.has_flag("show_fps") {
                    blackboard.clear_flag("show_fps");
                } else {
                    blackboard.set_flag("show_fps");
                }
            }
            Some("input") => {
                let mut blackboard = ctx.blackboard();
                if blackboard.has_flag("show_input") {
                    blackboard.clear_flag("show_input");
                } else {
                    blackboard.set_flag("show_input");
                }
            }
            Some("set") => {
                let key = words.next();
                let value = words.next().and_then(|v| v.parse::<f32>().ok());
                match (key, value) {
                    (Some(key), Some(value)) => ctx.blackboard().set_scalar(key, value),
                    _ => log::info!("console: usage: set <key> <value>"),
                }
            }
            Some("timescale") => {
                match words.next().and_then(|v| v.parse::<f32>().ok()) {
                    Some(scale) if scale >= 0.0 => {
                        ctx.world.resource_mut::<WorldClock>().time_scale = scale;
                    }
                    _ => log::info!("console: usage: timescale <value>"),
                }
            }
            Some(other) => log::info!("console: unknown command '{}'", other),
        }
    }
}

impl Layer for ConsoleLayer {
    fn name(&self) -> &str {
        "console"
    }

    fn on_begin(&mut self, _frame: &StackRef<'_>, ctx: &mut EngineCtx<'_>) {
        self.line.clear();
        let mut blackboard = ctx.blackboard();
        blackboard.set_flag("console_open");
        blackboard.set_string("console_line", "");
    }

    fn on_end(&mut self, _frame: &StackRef<'_>, ctx: &mut EngineCtx<'_>) {
        let mut blackboard = ctx.blackboard();
        blackboard.clear_flag("console_open");
        blackboard.remove_string("console_line");
    }

    fn on_tick(
        &mut self,
        _frame: &StackRef<'_>,
        ctx: &mut EngineCtx<'_>,
        _dt: f32,
        _input: &InputSnapshot,
    ) {
        ctx.blackboard()
            .set_string("console_line", self.line.clone());
    }

    fn filter_input(&mut self, input: &mut InputSnapshot) -> InputFilter {
        for code in FILTERED_CODES {
            input.clear(code);
        }
        InputFilter::Pass
    }

    fn on_text_input(
        &mut self,
        _frame: &StackRef<'_>,
        _ctx: &mut EngineCtx<'_>,
        text: &str,
    ) -> bool {
        self.line.push_str(text);
        true
    }

    fn on_keyboard(
        &mut self,
        frame: &StackRef<'_>,
        ctx: &mut EngineCtx<'_>,
        event: &KeyEvent,
    ) -> bool {
        if event.is_press(InputCode::Backspace) {
            self.line.pop();
        }
        if event.is_press(InputCode::Enter) {
            self.execute(ctx);
            self.line.clear();
        }
        if event.is_press(InputCode::Escape) || event.is_press(InputCode::F1) {
            frame.remove_me(ctx);
        }
        // The console owns the keyboard while it is open.
        true
    }
}
