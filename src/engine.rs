//! Engine shell: window, world, signal hub, layer stack, main loop.
//!
//! The [`Engine`] owns everything with a lifetime longer than one frame and
//! drives the per-frame sequence: advance the clock, pump platform events
//! into the [`LayerStack`](crate::layers::LayerStack), tick the stack with
//! the live input snapshot, draw, and check for quit. The
//! [`EngineCtx`] is the per-frame view of the mutable engine state handed to
//! every layer and listener callback; there is no global state to reach
//! for.

use bevy_ecs::prelude::World;

use crate::audio;
use crate::input::InputSnapshot;
use crate::layers::LayerStack;
use crate::platform::keymap::Keymap;
use crate::platform::pump::{self, PlatformEvent};
use crate::render;
use crate::resources::blackboard::Blackboard;
use crate::resources::camera::CameraRes;
use crate::resources::config::EngineConfig;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldclock::WorldClock;
use crate::signals::{Signal, SignalHub};

use bevy_ecs::prelude::Entity;
use raylib::prelude::{RaylibHandle, RaylibThread};

/// Per-frame view of the mutable engine state, threaded through every layer
/// and listener callback.
pub struct EngineCtx<'a> {
    /// The entity/component store and its resources.
    pub world: &'a mut World,
    /// The entity signal hub.
    pub signals: &'a mut SignalHub,
}

impl EngineCtx<'_> {
    /// Broadcast `signal` against `entity`. Shorthand for going through
    /// [`EngineCtx::signals`] with the world threaded in.
    pub fn broadcast(&mut self, entity: Entity, signal: Signal) {
        self.signals.broadcast(self.world, entity, signal);
    }

    /// The blackboard resource, for the common flag/readout cases.
    pub fn blackboard(&mut self) -> bevy_ecs::prelude::Mut<'_, Blackboard> {
        self.world.resource_mut::<Blackboard>()
    }
}

/// Everything the running engine owns: window handle, ECS world, signal
/// hub, layer stack and the live input snapshot.
pub struct Engine {
    world: World,
    signals: SignalHub,
    stack: LayerStack,
    snapshot: InputSnapshot,
    keymap: Keymap,
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl Engine {
    /// Open the window and set up the world with its standard resources.
    pub fn new(config: EngineConfig) -> Engine {
        let mut builder = raylib::init();
        builder
            .size(config.window_width as i32, config.window_height as i32)
            .title("Stratum Engine")
            .resizable();
        if config.vsync {
            builder.vsync();
        }
        if config.fullscreen {
            builder.fullscreen();
        }
        let (mut rl, thread) = builder.build();
        rl.set_target_fps(config.target_fps);
        // Escape belongs to the layers, not the window system.
        rl.set_exit_key(None);

        let mut keymap = Keymap::default();
        if let Some(path) = &config.bindings_path {
            if let Err(e) = keymap.load_overrides(path) {
                log::warn!("ignoring key bindings file: {}", e);
            }
        }

        let mut world = World::new();
        world.insert_resource(WorldClock::default());
        world.insert_resource(Blackboard::default());
        world.insert_resource(CameraRes::default());
        world.insert_resource(WindowSize {
            w: rl.get_screen_width(),
            h: rl.get_screen_height(),
        });
        world.insert_resource(config);

        audio::setup_audio(&mut world);

        Engine {
            world,
            signals: SignalHub::new(),
            stack: LayerStack::new(),
            snapshot: InputSnapshot::default(),
            keymap,
            rl,
            thread,
        }
    }

    /// Scoped access to the stack and context, for assembling the game:
    /// spawning entities, registering listeners, pushing the initial layers.
    pub fn setup<F>(&mut self, build: F)
    where
        F: FnOnce(&LayerStack, &mut EngineCtx<'_>),
    {
        let mut ctx = EngineCtx {
            world: &mut self.world,
            signals: &mut self.signals,
        };
        build(&self.stack, &mut ctx);
    }

    /// Run the frame loop until a quit request goes unclaimed or something
    /// raises the blackboard `quit` flag. Tears the stack down through the
    /// full removal contract before returning.
    pub fn run(&mut self) {
        log::info!("entering main loop");
        loop {
            let raw_dt = self.rl.get_frame_time();
            self.world.resource_mut::<WorldClock>().advance(raw_dt);
            let dt = self.world.resource::<WorldClock>().delta;

            let events = pump::poll(&mut self.rl, &self.keymap, &mut self.snapshot);
            {
                let mut ctx = EngineCtx {
                    world: &mut self.world,
                    signals: &mut self.signals,
                };
                for event in &events {
                    match event {
                        PlatformEvent::Key(ev) => {
                            self.stack.keyboard_event(&mut ctx, ev);
                        }
                        PlatformEvent::Text(text) => {
                            self.stack.text_input(&mut ctx, text);
                        }
                        PlatformEvent::MouseMove(ev) => {
                            self.stack.mouse_move(&mut ctx, ev);
                        }
                        PlatformEvent::MouseButton(ev) => {
                            self.stack.mouse_button(&mut ctx, ev);
                        }
                        PlatformEvent::MouseWheel(delta) => {
                            self.stack.mouse_wheel(&mut ctx, *delta);
                        }
                        PlatformEvent::Resized(w, h) => {
                            *ctx.world.resource_mut::<WindowSize>() = WindowSize { w: *w, h: *h };
                            self.stack.window_resized(&mut ctx, *w, *h);
                        }
                    }
                }

                self.stack.tick(&mut ctx, dt, &mut self.snapshot);
            }

            render::draw_frame(&mut self.rl, &self.thread, &mut self.world);
            audio::pump_messages(&mut self.world);

            if self.world.resource::<Blackboard>().has_flag("quit") {
                log::info!("quit flag raised");
                break;
            }
            if self.rl.window_should_close() {
                let mut ctx = EngineCtx {
                    world: &mut self.world,
                    signals: &mut self.signals,
                };
                if !self.stack.quit_requested(&mut ctx) {
                    break;
                }
            }
        }

        log::info!("shutting down");
        {
            let mut ctx = EngineCtx {
                world: &mut self.world,
                signals: &mut self.signals,
            };
            self.stack.remove_all(&mut ctx);
        }
        audio::shutdown_audio(&mut self.world);
    }
}
