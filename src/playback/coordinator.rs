use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::lyrics::{LyricCursor, LyricTrack};
use crate::playlist::{
    AppendOutcome, PlaylistError, PlaylistState, Track, absolute_path, accepts_extension,
};

use super::player::{MediaPlayer, PlayerEvent, PlayerNotice, PlayerState};
use super::poller::LyricPoller;
use super::seek::SeekGesture;
use super::view::{PlayerView, format_clock};

/// Snapshot of what is playing and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub track: Option<usize>,
    pub shuffle: bool,
    pub lyric: Option<usize>,
    pub position_ms: u64,
    pub duration_ms: u64,
}

/// Drives playlist navigation, the audio collaborator and the lyric display.
///
/// All methods are meant to be called from one thread. The coordinator owns
/// the only copy of the playback state; views get told about changes and
/// never read it back.
pub struct PlaybackCoordinator<P: MediaPlayer, V: PlayerView> {
    playlist: PlaylistState,
    player: P,
    view: V,
    lyrics: LyricTrack,
    cursor: LyricCursor,
    poller: LyricPoller,
    seek: Option<SeekGesture>,
    /// Id of the track handed to the player last; older notices are stale.
    load: Option<u64>,
    /// Loads that failed in a row since the last playable track.
    failed_loads: usize,
    position_ms: u64,
    duration_ms: u64,
    settings: Settings,
}

impl<P: MediaPlayer, V: PlayerView> PlaybackCoordinator<P, V> {
    pub fn new(mut playlist: PlaylistState, player: P, view: V, settings: &Settings) -> Self {
        playlist.set_shuffle(settings.playback.shuffle);
        let poller = LyricPoller::new(
            Duration::from_millis(settings.playback.lyric_poll_ms),
            Duration::from_millis(settings.playback.idle_poll_ms),
        );
        Self {
            playlist,
            player,
            view,
            lyrics: LyricTrack::default(),
            cursor: LyricCursor::new(),
            poller,
            seek: None,
            load: None,
            failed_loads: 0,
            position_ms: 0,
            duration_ms: 0,
            settings: settings.clone(),
        }
    }

    /// Push the initial state to the view and apply the configured volume.
    pub fn start(&mut self) {
        let volume = self.settings.playback.volume.min(100);
        self.player.set_volume(volume);

        self.view.set_status_text(&self.settings.ui.ready_text);
        self.view.set_lyric(&self.settings.lyrics.missing_placeholder);
        self.view.set_overlay_lyric("");
        self.view.set_progress_range(0);
        self.view.set_progress_position(0);
        self.view.set_elapsed_text(&format_clock(0));
        self.view.set_volume(volume);
        self.view.set_playing(false);
        self.show_shuffle();
        self.show_playlist();
    }

    pub fn playlist(&self) -> &PlaylistState {
        &self.playlist
    }

    #[cfg(test)]
    pub(super) fn player(&self) -> &P {
        &self.player
    }

    #[cfg(test)]
    pub(super) fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub(super) fn lyrics(&self) -> &LyricTrack {
        &self.lyrics
    }

    #[cfg(test)]
    pub(super) fn lyric_index(&self) -> Option<usize> {
        self.cursor.current()
    }

    #[cfg(test)]
    pub(super) fn is_seeking(&self) -> bool {
        self.seek.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            track: self.playlist.current_index(),
            shuffle: self.playlist.shuffle(),
            lyric: self.cursor.current(),
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
        }
    }

    pub fn select(&mut self, index: usize) -> Result<(), PlaylistError> {
        self.failed_loads = 0;
        let track = self.playlist.select(index).inspect_err(|e| {
            warn!(error = %e, "cannot select track");
        })?;
        self.play_track(track);
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), PlaylistError> {
        self.failed_loads = 0;
        self.advance()
    }

    /// `next` without resetting the failed-load count; used for
    /// automatic advances.
    fn advance(&mut self) -> Result<(), PlaylistError> {
        let track = self.playlist.next().inspect_err(|e| {
            info!(error = %e, "nothing to play next");
        })?;
        self.play_track(track);
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), PlaylistError> {
        self.failed_loads = 0;
        let track = self.playlist.previous().inspect_err(|e| {
            info!(error = %e, "nothing to play before");
        })?;
        self.play_track(track);
        Ok(())
    }

    /// Flip shuffle mode. The current track and lyric line are untouched.
    pub fn toggle_shuffle(&mut self) -> bool {
        let shuffle = self.playlist.toggle_shuffle();
        info!(shuffle, "toggled shuffle");
        self.show_shuffle();
        shuffle
    }

    /// Pause when playing, otherwise resume. With nothing loaded yet the
    /// first playlist entry starts.
    pub fn toggle_play(&mut self) {
        match self.player.state() {
            PlayerState::Playing => {
                self.player.pause();
                self.view.set_playing(false);
            }
            PlayerState::Paused => {
                self.player.play();
                self.view.set_playing(true);
            }
            PlayerState::Stopped => {
                let current = self.playlist.current().cloned();
                match current {
                    Some(track) => self.play_track(track),
                    None if !self.playlist.is_empty() => {
                        let _ = self.select(0);
                    }
                    None => info!("playlist is empty, nothing to play"),
                }
            }
        }
    }

    /// Add dropped or command-line paths, keeping only the accepted audio
    /// extension. Relative paths are stored resolved against the working
    /// directory. Returns how many tracks were new.
    pub fn add_paths<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut added = 0;
        for path in paths {
            let path = path.as_ref();
            if !accepts_extension(path, &self.settings.playlist.extension) {
                info!(
                    path,
                    extension = %self.settings.playlist.extension,
                    "ignoring file with unsupported extension"
                );
                continue;
            }
            let Some(absolute) = absolute_path(path) else {
                warn!(path, "cannot resolve path, skipping");
                continue;
            };
            if self.playlist.append(&absolute) == AppendOutcome::Added {
                added += 1;
            }
        }
        self.show_playlist();
        added
    }

    /// Apply a notice from the player, dropping those about an earlier
    /// track.
    pub fn handle_notice(&mut self, notice: PlayerNotice) {
        if self.load != Some(notice.load) {
            debug!(load = notice.load, event = ?notice.event, "dropping stale player event");
            return;
        }
        self.handle_player_event(notice.event);
    }

    /// Apply an event about the currently loaded track.
    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        if event != PlayerEvent::LoadFailed {
            self.failed_loads = 0;
        }
        match event {
            PlayerEvent::PositionChanged(ms) => self.on_position(ms),
            PlayerEvent::DurationChanged(ms) => {
                self.duration_ms = ms;
                self.view.set_progress_range(ms);
            }
            PlayerEvent::EndOfMedia => {
                debug!("end of track, advancing");
                let _ = self.advance();
            }
            PlayerEvent::LoadFailed => {
                self.failed_loads += 1;
                self.view.set_playing(false);
                if self.failed_loads < self.playlist.len() {
                    warn!(failed = self.failed_loads, "track failed to load, skipping");
                    let _ = self.advance();
                } else {
                    warn!("no track in the playlist could be played");
                }
            }
        }
    }

    /// Resolve the lyric line for the player's current position.
    ///
    /// Does nothing while a seek is pending. Returns `true` when the
    /// displayed line changed.
    pub fn update_lyrics(&mut self) -> bool {
        if self.poller.is_suspended() {
            return false;
        }
        let position = self.player.position();
        self.sync_lyrics_at(position_as_signed(position))
    }

    /// Show the lyric line active at `position_ms`, if it differs from the
    /// one on screen.
    pub fn sync_lyrics_at(&mut self, position_ms: i64) -> bool {
        if !self.cursor.advance(self.lyrics.entries(), position_ms) {
            return false;
        }
        match self.cursor.current().and_then(|i| self.lyrics.get(i)) {
            Some(entry) => {
                debug!(at = %entry.tag(), "lyric line");
                self.view.set_lyric(&entry.text);
                self.view.fade_in_lyric();
                self.view.set_overlay_lyric(&entry.text);
                self.view.fade_in_overlay();
            }
            None => self.view.set_lyric(""),
        }
        true
    }

    /// Periodic work: commit an expired seek gesture and poll lyrics.
    pub fn tick(&mut self, now: Instant) {
        if self.seek.is_some_and(|s| s.is_ready(now)) {
            self.commit_seek(now);
        }
        let playing = self.player.state() == PlayerState::Playing;
        if self.poller.due(now, playing) {
            self.update_lyrics();
        }
    }

    pub fn seek_forward(&mut self, now: Instant) {
        let step = i64::try_from(self.settings.playback.seek_step_ms).unwrap_or(i64::MAX);
        self.scrub(step, now);
    }

    pub fn seek_backward(&mut self, now: Instant) {
        let step = i64::try_from(self.settings.playback.seek_step_ms).unwrap_or(i64::MAX);
        self.scrub(-step, now);
    }

    /// Start or extend a seek gesture by `delta_ms`.
    ///
    /// Lyric polling stays suspended and the progress display shows the
    /// pending target until the gesture is committed.
    pub fn scrub(&mut self, delta_ms: i64, now: Instant) {
        if self.playlist.current().is_none() {
            return;
        }
        let hold = Duration::from_millis(self.settings.playback.seek_commit_ms);
        let duration = self.known_duration();
        let target = match self.seek.as_mut() {
            Some(gesture) => {
                gesture.nudge(delta_ms, duration, now, hold);
                gesture.target_ms()
            }
            None => {
                let gesture =
                    SeekGesture::start(self.player.position(), delta_ms, duration, now, hold);
                self.poller.suspend();
                self.seek = Some(gesture);
                gesture.target_ms()
            }
        };
        self.view.set_progress_position(target);
    }

    /// Apply the pending seek, resume polling and refresh lyrics at once.
    pub fn commit_seek(&mut self, now: Instant) {
        let Some(gesture) = self.seek.take() else {
            return;
        };
        let target = gesture.target_ms();
        self.player.set_position(target);
        self.position_ms = target;
        self.poller.resume(now);
        self.view.set_progress_position(target);
        self.view.set_elapsed_text(&format_clock(target));
        info!(position_ms = target, "seek committed");
        self.update_lyrics();
    }

    pub fn volume(&self) -> u8 {
        self.player.volume()
    }

    pub fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        self.player.set_volume(volume);
        self.view.set_volume(volume);
    }

    pub fn volume_up(&mut self) {
        let step = self.settings.playback.volume_step;
        self.set_volume(self.volume().saturating_add(step));
    }

    pub fn volume_down(&mut self) {
        let step = self.settings.playback.volume_step;
        self.set_volume(self.volume().saturating_sub(step));
    }

    /// How long the event loop may sleep before `tick` has work to do.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        let playing = self.player.state() == PlayerState::Playing;
        let seek = self
            .seek
            .map(|s| s.commit_at().saturating_duration_since(now));
        match (seek, self.poller.time_until(now, playing)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn on_position(&mut self, ms: u64) {
        self.position_ms = ms;
        self.view.set_elapsed_text(&format_clock(ms));
        if self.seek.is_some() {
            return;
        }
        self.view.set_progress_position(ms);
        self.sync_lyrics_at(position_as_signed(ms));
    }

    fn play_track(&mut self, track: Track) {
        if self.seek.take().is_some() {
            self.poller.resume(Instant::now());
        }

        info!(track = track.path(), "now playing");
        self.load = Some(self.player.load(track.as_path()));
        self.player.play();

        self.lyrics = LyricTrack::load_for(track.as_path(), &self.settings.lyrics.encodings);
        self.cursor.reset();
        if self.lyrics.is_empty() {
            self.view.set_lyric(&self.settings.lyrics.missing_placeholder);
        } else {
            self.view.set_lyric("");
        }
        self.view.set_overlay_lyric("");

        self.position_ms = 0;
        self.duration_ms = 0;
        self.view.set_progress_range(0);
        self.view.set_progress_position(0);
        self.view.set_elapsed_text(&format_clock(0));
        self.view.set_status_text(track.title());
        self.view.set_current_track(self.playlist.current_index());
        self.view.set_playing(true);
    }

    fn known_duration(&self) -> u64 {
        if self.duration_ms > 0 {
            self.duration_ms
        } else {
            self.player.duration()
        }
    }

    fn show_shuffle(&mut self) {
        let shuffle = self.playlist.shuffle();
        let label = if shuffle {
            &self.settings.ui.shuffle_text
        } else {
            &self.settings.ui.sequential_text
        };
        self.view.set_shuffle(shuffle, label);
    }

    fn show_playlist(&mut self) {
        self.view.set_playlist(self.playlist.tracks());
        self.view.set_current_track(self.playlist.current_index());
    }
}

fn position_as_signed(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}
