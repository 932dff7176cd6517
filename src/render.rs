//! Minimal 3D render pass.
//!
//! Draws the world from plain component data: a ground grid, one cube per
//! entity with a [`Location`], a facing indicator for entities that carry an
//! [`Orientation`], and the HUD readouts the layers left on the blackboard.
//! Rendering never talks to the signal hub or the layer stack. By the time
//! this runs, the transform-sync listener has already mirrored the frame's
//! physics results into components.

use bevy_ecs::prelude::World;
use raylib::prelude::*;

use crate::components::group::Group;
use crate::components::location::Location;
use crate::components::orientation::Orientation;
use crate::resources::blackboard::Blackboard;
use crate::resources::camera::CameraRes;
use crate::resources::windowsize::WindowSize;

const BACKGROUND: Color = Color::new(18, 18, 26, 255);

/// Draw one frame.
pub fn draw_frame(rl: &mut RaylibHandle, thread: &RaylibThread, world: &mut World) {
    let mut cubes: Vec<(Vector3, Option<Quaternion>, &'static str)> = Vec::new();
    {
        let mut query = world.query::<(&Location, Option<&Orientation>, &Group)>();
        for (location, orientation, group) in query.iter(world) {
            cubes.push((location.pos, orientation.map(|o| o.quat), group.name()));
        }
    }

    let camera = world.resource::<CameraRes>().0;
    let window = *world.resource::<WindowSize>();
    let (status, show_fps, paused, console_line) = {
        let blackboard = world.resource::<Blackboard>();
        (
            blackboard.get_string("hud_status").cloned(),
            blackboard.has_flag("show_fps"),
            blackboard.has_flag("paused"),
            if blackboard.has_flag("console_open") {
                Some(
                    blackboard
                        .get_string("console_line")
                        .cloned()
                        .unwrap_or_default(),
                )
            } else {
                None
            },
        )
    };

    let mut d = rl.begin_drawing(thread);
    d.clear_background(BACKGROUND);

    {
        let mut d3 = d.begin_mode3D(camera);
        d3.draw_grid(24, 1.0);
        for (position, orientation, group) in &cubes {
            let color = match *group {
                "player" => Color::GOLD,
                _ => Color::LIGHTGRAY,
            };
            d3.draw_cube(*position, 1.0, 1.0, 1.0, color);
            d3.draw_cube_wires(*position, 1.0, 1.0, 1.0, Color::DARKGRAY);
            if let Some(quat) = orientation {
                // Yaw-only orientation: recover the angle and draw a short
                // facing line out of the cube.
                let yaw = 2.0 * quat.y.atan2(quat.w);
                let forward = Vector3 {
                    x: yaw.sin(),
                    y: 0.0,
                    z: -yaw.cos(),
                };
                d3.draw_line_3D(*position, *position + forward.scale_by(1.2), Color::RED);
            }
        }
    }

    if let Some(status) = &status {
        d.draw_text(status, 10, 10, 20, Color::RAYWHITE);
    }
    if show_fps {
        d.draw_fps(10, 36);
    }
    if paused {
        d.draw_text(
            "PAUSED",
            window.w / 2 - 80,
            window.h / 2 - 20,
            40,
            Color::ORANGE,
        );
        d.draw_text(
            "press escape to resume",
            window.w / 2 - 110,
            window.h / 2 + 24,
            20,
            Color::RAYWHITE,
        );
    }
    if let Some(line) = &console_line {
        d.draw_rectangle(0, 0, window.w, 64, Color::new(0, 0, 0, 200));
        d.draw_text(&format!("> {}", line), 10, 22, 20, Color::GREEN);
    }
}
