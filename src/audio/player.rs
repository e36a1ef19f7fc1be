use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::warn;

use crate::playback::{MediaPlayer, PlayerNotice, PlayerState};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    OutputUnavailable(String),

    #[error("audio worker exited during startup")]
    WorkerGone,
}

/// Handle to the audio worker thread.
///
/// Commands are queued and applied in order by the worker. State reads
/// come from the shared `PlaybackInfo`, which this handle updates eagerly
/// so that a read right after a command already reflects it.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
    last_load: u64,
}

impl AudioPlayer {
    /// Start the worker and open the default output device.
    ///
    /// Returns the player and the receiving end of its event channel.
    pub fn spawn() -> Result<(Self, Receiver<PlayerNotice>), AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<PlayerNotice>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), event_tx, ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(reason)) => {
                let _ = audio_handle.join();
                return Err(AudioError::OutputUnavailable(reason));
            }
            Err(_) => {
                let _ = audio_handle.join();
                return Err(AudioError::WorkerGone);
            }
        }

        let player = Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
            last_load: 0,
        };
        Ok((player, event_rx))
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(command = ?e.0, "audio worker is gone");
        }
    }

    fn update(&self, f: impl FnOnce(&mut PlaybackInfo)) {
        if let Ok(mut info) = self.playback.lock() {
            f(&mut info);
        }
    }

    fn snapshot(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }

    /// Stop playback and wait for the worker to exit.
    pub fn quit(&self) {
        let _ = self.tx.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.quit();
    }
}

impl MediaPlayer for AudioPlayer {
    fn load(&mut self, path: &Path) -> u64 {
        self.last_load += 1;
        self.update(|info| {
            info.state = PlayerState::Stopped;
            info.position_ms = 0;
            info.duration_ms = 0;
        });
        self.send(AudioCmd::Load(path.to_path_buf(), self.last_load));
        self.last_load
    }

    fn play(&mut self) {
        self.update(|info| info.state = PlayerState::Playing);
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.update(|info| {
            if info.state == PlayerState::Playing {
                info.state = PlayerState::Paused;
            }
        });
        self.send(AudioCmd::Pause);
    }

    fn state(&self) -> PlayerState {
        self.snapshot().state
    }

    fn position(&self) -> u64 {
        self.snapshot().position_ms
    }

    fn set_position(&mut self, position_ms: u64) {
        self.update(|info| info.position_ms = position_ms);
        self.send(AudioCmd::Seek(position_ms));
    }

    fn duration(&self) -> u64 {
        self.snapshot().duration_ms
    }

    fn volume(&self) -> u8 {
        self.snapshot().volume
    }

    fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        self.update(|info| info.volume = volume);
        self.send(AudioCmd::SetVolume(volume));
    }
}
