use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::playback::PlayerView;
use crate::playlist::Track;

use super::controls::{ButtonState, Control};
use super::fade::FadingText;

/// Everything the terminal shows, as last reported by the coordinator,
/// plus purely visual state (panel visibility, playlist cursor, button
/// flashes).
#[derive(Debug, Clone)]
pub struct ViewState {
    pub(super) status: String,
    pub(super) lyric: FadingText,
    pub(super) overlay: FadingText,
    pub(super) progress_range: u64,
    pub(super) progress_position: u64,
    pub(super) elapsed: String,
    pub(super) shuffle: bool,
    pub(super) shuffle_label: String,
    pub(super) playing: bool,
    pub(super) volume: u8,
    pub(super) tracks: Vec<String>,
    pub(super) current: Option<usize>,
    cursor: usize,
    show_playlist: bool,
    show_overlay: bool,
    pressed: Option<(Control, Instant)>,
}

impl ViewState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            status: String::new(),
            lyric: FadingText::new(Duration::from_millis(settings.lyrics.label_fade_ms)),
            overlay: FadingText::new(Duration::from_millis(settings.lyrics.overlay_fade_ms)),
            progress_range: 0,
            progress_position: 0,
            elapsed: String::new(),
            shuffle: false,
            shuffle_label: String::new(),
            playing: false,
            volume: 0,
            tracks: Vec::new(),
            current: None,
            cursor: 0,
            show_playlist: settings.ui.show_playlist,
            show_overlay: settings.ui.show_overlay,
            pressed: None,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn lyric(&self) -> &str {
        self.lyric.text()
    }

    pub fn overlay_lyric(&self) -> &str {
        self.overlay.text()
    }

    pub fn elapsed(&self) -> &str {
        &self.elapsed
    }

    /// Fraction of the track played, for the progress gauge.
    pub fn progress_ratio(&self) -> f64 {
        if self.progress_range == 0 {
            return 0.0;
        }
        (self.progress_position as f64 / self.progress_range as f64).clamp(0.0, 1.0)
    }

    pub fn shuffle_label(&self) -> &str {
        &self.shuffle_label
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn show_playlist(&self) -> bool {
        self.show_playlist
    }

    pub fn show_overlay(&self) -> bool {
        self.show_overlay
    }

    pub fn toggle_playlist(&mut self) {
        self.show_playlist = !self.show_playlist;
    }

    pub fn toggle_overlay(&mut self) {
        self.show_overlay = !self.show_overlay;
    }

    /// Highlighted row of the playlist panel.
    pub fn cursor(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.cursor)
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.tracks.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Remember a key press so the matching button flashes.
    pub fn press(&mut self, control: Control, now: Instant) {
        self.pressed = Some((control, now));
    }

    pub fn button_state(&self, control: Control, now: Instant) -> ButtonState {
        let pressed_at = self
            .pressed
            .filter(|(c, _)| *c == control)
            .map(|(_, at)| at);
        let active = match control {
            Control::PlayPause => self.playing,
            Control::Shuffle => self.shuffle,
            Control::Playlist => self.show_playlist,
            Control::Overlay => self.show_overlay,
            _ => false,
        };
        ButtonState::resolve(pressed_at, active, now)
    }

    /// True while a fade or a button flash still needs redrawing.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.lyric.is_animating(now)
            || self.overlay.is_animating(now)
            || self
                .pressed
                .is_some_and(|(c, _)| self.button_state(c, now) == ButtonState::Pressed)
    }
}

impl PlayerView for ViewState {
    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_lyric(&mut self, text: &str) {
        self.lyric.set(text);
    }

    fn fade_in_lyric(&mut self) {
        self.lyric.fade_in_at(Instant::now());
    }

    fn set_overlay_lyric(&mut self, text: &str) {
        self.overlay.set(text);
    }

    fn fade_in_overlay(&mut self) {
        self.overlay.fade_in_at(Instant::now());
    }

    fn set_progress_range(&mut self, duration_ms: u64) {
        self.progress_range = duration_ms;
    }

    fn set_progress_position(&mut self, position_ms: u64) {
        self.progress_position = position_ms;
    }

    fn set_elapsed_text(&mut self, text: &str) {
        self.elapsed = text.to_string();
    }

    fn set_shuffle(&mut self, shuffle: bool, label: &str) {
        self.shuffle = shuffle;
        self.shuffle_label = label.to_string();
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
    }

    fn set_playlist(&mut self, tracks: &[Track]) {
        self.tracks = tracks.iter().map(|t| t.title().to_string()).collect();
        if self.cursor >= self.tracks.len() {
            self.cursor = self.tracks.len().saturating_sub(1);
        }
    }

    fn set_current_track(&mut self, index: Option<usize>) {
        self.current = index.filter(|&i| i < self.tracks.len());
        if let Some(i) = self.current {
            self.cursor = i;
        }
    }
}
