//! Audio command bridge and background playback thread.
//!
//! Raylib's audio device is owned by one dedicated thread; the rest of the
//! engine only ever talks to it through channels. Layers and listeners send
//! [`AudioCmd`]s via the [`AudioBridge`] resource and the thread answers
//! with [`AudioMessage`]s, which the engine drains and logs once per frame.
//!
//! The core dispatch path never blocks on audio: sends are fire-and-forget
//! over an unbounded channel, and a missing or failed audio device degrades
//! to logged load failures while the engine keeps running.
//!
//! Use [`setup_audio`] once during initialization to spawn the thread and
//! insert the [`AudioBridge`] resource. Call [`shutdown_audio`] during
//! teardown to stop the thread and free audio resources.

use bevy_ecs::prelude::{Resource, World};
use crossbeam_channel::{Receiver, Sender, unbounded};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Commands sent *to* the audio thread.
#[derive(Debug, Clone)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    Shutdown,
}

/// Messages sent *back* from the audio thread.
#[derive(Debug, Clone)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicFinished { id: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
}

/// Shared bridge between the ECS world and the audio thread.
///
/// Created by [`setup_audio`]. Layers and listeners send commands via
/// [`AudioBridge::tx_cmd`]; the engine polls [`AudioBridge::rx_msg`] each
/// frame.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (engine -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> engine).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread and register the bridge resource.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
}

/// Gracefully request shutdown of the audio thread and join it.
///
/// If the bridge resource exists, sends [`AudioCmd::Shutdown`], waits for
/// the thread to exit, and removes the resource from the world.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}

/// Drain pending audio-thread messages and log them. Runs once per frame on
/// the main thread so the channel never grows without bound.
pub fn pump_messages(world: &mut World) {
    if let Some(bridge) = world.get_resource::<AudioBridge>() {
        for msg in bridge.rx_msg.try_iter() {
            match msg {
                AudioMessage::MusicLoadFailed { id, error }
                | AudioMessage::FxLoadFailed { id, error } => {
                    log::warn!("audio load failed id='{}': {}", id, error);
                }
                other => log::debug!("audio: {:?}", other),
            }
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns the Raylib audio device and every `Music`/`Sound` handle, reacts to
/// [`AudioCmd`] inputs, emits [`AudioMessage`] outputs, and pumps music
/// streams while they play. Blocks until [`AudioCmd::Shutdown`] arrives.
///
/// If the audio device cannot be initialized (headless machines, missing
/// drivers) the thread stays up and answers every load with a failure
/// message, so the rest of the engine does not care.
fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            log::error!("audio device unavailable: {}", e);
            run_deaf(rx_cmd, tx_msg);
            return;
        }
    };

    log::debug!("audio thread starting (id={:?})", std::thread::current().id());

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        log::debug!("music loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id);
                        } else {
                            looped.remove(&id);
                        }
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        log::debug!("fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        sound.play();
                    } else {
                        log::debug!("fx play skipped id='{}' (not loaded)", id);
                    }
                }
                AudioCmd::Shutdown => {
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    sounds.clear();
                    break 'run;
                }
            }
        }

        // 2) Pump streaming + detect ends.
        //    `update_stream()` must be called regularly while playing. If a
        //    track ended and isn't looped, emit Finished exactly once.
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else {
                    let len = music.get_time_length();
                    let played = music.get_time_played();
                    if played >= len - 0.01 {
                        ended.push(id.clone());
                    }
                }
            }
        }
        for id in ended.iter() {
            if looped.contains(id) {
                if let Some(music) = musics.get(id) {
                    music.seek_stream(0.0);
                    music.play_stream();
                }
            } else {
                playing.remove(id);
                let _ = tx_msg.send(AudioMessage::MusicFinished { id: id.clone() });
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    log::debug!("audio thread exiting (id={:?})", std::thread::current().id());

    // On exit, musics and sounds drop before `audio`, satisfying lifetimes
}

/// Fallback loop for machines without an audio device: answer every load
/// with a failure and wait for shutdown.
fn run_deaf(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadMusic { id, .. } => {
                let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                    id,
                    error: "no audio device".to_string(),
                });
            }
            AudioCmd::LoadFx { id, .. } => {
                let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                    id,
                    error: "no audio device".to_string(),
                });
            }
            AudioCmd::Shutdown => return,
            _ => {}
        }
    }
}
