use std::path::Path;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::playback::{PlayerEvent, PlayerNotice, PlayerState};

use super::source::open_source;
use super::types::{AudioCmd, PlaybackHandle, volume_to_gain};

/// How often the worker reports the position while playing.
const POSITION_TICK: Duration = Duration::from_millis(100);

/// Spawn the worker. `ready` receives `Ok(())` once the output device is
/// open, or the reason it could not be opened (the worker then exits).
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    events: Sender<PlayerNotice>,
    ready: Sender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut worker = Worker {
            stream,
            sink: None,
            gain: playback_info
                .lock()
                .map(|info| volume_to_gain(info.volume))
                .unwrap_or(1.0),
            last_position: None,
            current_load: 0,
            playback_info,
            events,
        };

        loop {
            match rx.recv_timeout(POSITION_TICK) {
                Ok(AudioCmd::Quit) => {
                    worker.stop();
                    break;
                }
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => worker.report_progress(),
                Err(RecvTimeoutError::Disconnected) => {
                    worker.stop();
                    break;
                }
            }
        }
        debug!("audio worker stopped");
    })
}

struct Worker {
    stream: OutputStream,
    sink: Option<Sink>,
    gain: f32,
    last_position: Option<u64>,
    /// Id of the most recent `Load`; stamped on every event.
    current_load: u64,
    playback_info: PlaybackHandle,
    events: Sender<PlayerNotice>,
}

impl Worker {
    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load(path, load) => self.load(&path, load),
            AudioCmd::Play => match self.sink.as_ref() {
                Some(sink) => {
                    sink.play();
                    self.set_state(PlayerState::Playing);
                }
                None => self.set_state(PlayerState::Stopped),
            },
            AudioCmd::Pause => {
                if let Some(sink) = self.sink.as_ref() {
                    sink.pause();
                    self.set_state(PlayerState::Paused);
                }
            }
            AudioCmd::Seek(ms) => self.seek(ms),
            AudioCmd::SetVolume(volume) => {
                self.gain = volume_to_gain(volume);
                if let Some(sink) = self.sink.as_ref() {
                    sink.set_volume(self.gain);
                }
            }
            // Handled by the loop.
            AudioCmd::Quit => {}
        }
    }

    fn load(&mut self, path: &Path, load: u64) {
        self.stop();
        self.current_load = load;

        let (source, duration) = match open_source(path) {
            Ok(opened) => opened,
            Err(e) => {
                error!(error = %e, "cannot play track");
                self.emit(PlayerEvent::LoadFailed);
                return;
            }
        };

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.gain);
        sink.append(source);
        self.sink = Some(sink);

        let duration_ms = duration.map_or(0, duration_millis);
        if let Ok(mut info) = self.playback_info.lock() {
            info.state = PlayerState::Paused;
            info.position_ms = 0;
            info.duration_ms = duration_ms;
        }
        debug!(path = %path.display(), duration_ms, "loaded track");

        self.last_position = Some(0);
        self.emit(PlayerEvent::PositionChanged(0));
        if duration_ms > 0 {
            self.emit(PlayerEvent::DurationChanged(duration_ms));
        }
    }

    fn seek(&mut self, ms: u64) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if let Err(e) = sink.try_seek(Duration::from_millis(ms)) {
            warn!(error = %e, position_ms = ms, "seek failed");
            return;
        }
        if let Ok(mut info) = self.playback_info.lock() {
            info.position_ms = ms;
        }
        self.last_position = Some(ms);
        self.emit(PlayerEvent::PositionChanged(ms));
    }

    /// Publish the position of a playing sink and detect the end of the track.
    fn report_progress(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if sink.is_paused() {
            return;
        }

        if sink.empty() {
            self.sink = None;
            self.last_position = None;
            self.set_state(PlayerState::Stopped);
            self.emit(PlayerEvent::EndOfMedia);
            return;
        }

        let position = duration_millis(sink.get_pos());
        if self.last_position != Some(position) {
            self.last_position = Some(position);
            if let Ok(mut info) = self.playback_info.lock() {
                info.position_ms = position;
            }
            self.emit(PlayerEvent::PositionChanged(position));
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.last_position = None;
        if let Ok(mut info) = self.playback_info.lock() {
            info.state = PlayerState::Stopped;
            info.position_ms = 0;
            info.duration_ms = 0;
        }
    }

    fn set_state(&self, state: PlayerState) {
        if let Ok(mut info) = self.playback_info.lock() {
            info.state = state;
        }
    }

    fn emit(&self, event: PlayerEvent) {
        let notice = PlayerNotice {
            load: self.current_load,
            event,
        };
        // The runtime may already be gone during shutdown.
        let _ = self.events.send(notice);
    }
}

pub(super) fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
