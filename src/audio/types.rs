//! Commands and shared state of the audio worker.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::playback::PlayerState;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current track with the file at this path, paused.
    /// Events about it carry the given load id.
    Load(PathBuf, u64),
    Play,
    Pause,
    /// Jump to an absolute position in milliseconds.
    Seek(u64),
    /// Volume on the 0 to 100 scale.
    SetVolume(u8),
    /// Stop playback and end the worker.
    Quit,
}

#[derive(Debug, Clone)]
/// Playback information shared between the worker and the handle.
pub struct PlaybackInfo {
    pub state: PlayerState,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub volume: u8,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            state: PlayerState::Stopped,
            position_ms: 0,
            duration_ms: 0,
            volume: 100,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Map the 0 to 100 volume scale onto a rodio gain factor.
pub fn volume_to_gain(volume: u8) -> f32 {
    f32::from(volume.min(100)) / 100.0
}
