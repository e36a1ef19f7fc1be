use std::path::PathBuf;

use serde::Deserialize;

use super::load::default_playlist_path;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lyricbox/config.toml` or `~/.config/lyricbox/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LYRICBOX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub playlist: PlaylistSettings,
    pub lyrics: LyricsSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Initial volume, 0 to 100.
    pub volume: u8,
    /// Volume change per key press.
    pub volume_step: u8,
    /// Lyric polling interval while playing (milliseconds).
    pub lyric_poll_ms: u64,
    /// Lyric polling interval while paused or stopped (milliseconds).
    pub idle_poll_ms: u64,
    /// How far one scrub key press moves the seek target (milliseconds).
    pub seek_step_ms: u64,
    /// A seek is applied once no scrub key was pressed for this long.
    pub seek_commit_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            volume: 30,
            volume_step: 10,
            lyric_poll_ms: 100,
            idle_poll_ms: 1500,
            seek_step_ms: 5000,
            seek_commit_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// The playlist file, one track path per line.
    pub path: PathBuf,
    /// The only audio extension accepted when adding files (case-insensitive).
    pub extension: String,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            path: default_playlist_path().unwrap_or_else(|| PathBuf::from("play_list.txt")),
            extension: "mp3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LyricsSettings {
    /// Encodings tried in order when decoding a `.lrc` file.
    ///
    /// Any WHATWG encoding label works, e.g. "utf-8", "gbk", "shift_jis".
    pub encodings: Vec<String>,
    /// Shown in the lyric label when a track has no lyrics.
    pub missing_placeholder: String,
    /// Fade-in duration of the lyric label (milliseconds).
    pub label_fade_ms: u64,
    /// Fade-in duration of the floating overlay (milliseconds).
    pub overlay_fade_ms: u64,
}

impl Default for LyricsSettings {
    fn default() -> Self {
        Self {
            encodings: vec![
                "utf-8".into(),
                "gbk".into(),
                "gb2312".into(),
                "latin1".into(),
            ],
            missing_placeholder: String::new(),
            label_fade_ms: 800,
            overlay_fade_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the playlist panel is visible at start.
    pub show_playlist: bool,
    /// Whether the floating lyric overlay is visible at start.
    pub show_overlay: bool,
    /// Status text before anything was played.
    pub ready_text: String,
    pub sequential_text: String,
    pub shuffle_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_playlist: true,
            show_overlay: false,
            ready_text: "Ready".to_string(),
            sequential_text: "Sequential".to_string(),
            shuffle_text: "Shuffle".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is not set, e.g. "info" or "lyricbox=debug".
    pub level: String,
    /// Log file; defaults to `$XDG_STATE_HOME/lyricbox/lyricbox.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
