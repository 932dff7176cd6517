//! Stratum Engine main entry point.
//!
//! A small 3D game engine written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for the entity/component store
//!
//! This executable runs the walking-cube demo scene: a player cube driven
//! through the entity signal bus, with a HUD, a pause menu and a debug
//! console stacked as layers.
//!
//! # Frame Flow
//!
//! 1. The platform pump refreshes the input snapshot and collects events
//! 2. Events route through the layer stack, top layer first
//! 3. The stack ticks every layer with the (possibly filtered) snapshot
//! 4. Layers broadcast entity signals; listeners react and chain
//! 5. The render pass draws components, camera and HUD readouts
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use clap::Parser;
use std::path::PathBuf;

use stratumengine::engine::Engine;
use stratumengine::game;
use stratumengine::resources::config::EngineConfig;

/// Stratum Engine 3D
#[derive(Parser)]
#[command(version, about = "A layered 3D game engine playground")]
struct Cli {
    /// Path to the configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a configuration file with default values and exit.
    /// Optionally provide a path (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write a default config and quit (no window needed)
    if let Some(maybe_path) = cli.write_default_config {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("./config.ini"));
        let config = EngineConfig::with_path(&path);
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("config written to {}", path.display());
        return;
    }

    log::info!("Hello, world! This is the Stratum Engine!");

    let mut config = match cli.config {
        Some(path) => EngineConfig::with_path(path),
        None => EngineConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    let mut engine = Engine::new(config);
    engine.setup(game::build);
    engine.run();
}
