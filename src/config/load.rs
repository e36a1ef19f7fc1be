use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `LYRICBOX__`) override it, and falls back to struct
/// defaults for anything left unset.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LYRICBOX")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("lyrics.encodings")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.lyric_poll_ms == 0 {
            return Err("playback.lyric_poll_ms must be >= 1".to_string());
        }
        if self.playback.idle_poll_ms == 0 {
            return Err("playback.idle_poll_ms must be >= 1".to_string());
        }
        if self.playback.volume > 100 {
            return Err("playback.volume must be between 0 and 100".to_string());
        }
        if self.lyrics.encodings.is_empty() {
            return Err("lyrics.encodings must name at least one encoding".to_string());
        }
        if self.playlist.extension.trim().trim_start_matches('.').is_empty() {
            return Err("playlist.extension must not be empty".to_string());
        }
        Ok(())
    }

    /// The log file in use: `log.file` or the XDG state default.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(default_log_path)
    }
}

/// Resolve the config path from `LYRICBOX_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("LYRICBOX_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/lyricbox/config.toml`
/// or `~/.config/lyricbox/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("lyricbox").join("config.toml"))
}

/// `$XDG_DATA_HOME/lyricbox/play_list.txt` or `~/.local/share/lyricbox/play_list.txt`.
pub fn default_playlist_path() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"]).map(|d| d.join("lyricbox").join("play_list.txt"))
}

/// `$XDG_STATE_HOME/lyricbox/lyricbox.log` or `~/.local/state/lyricbox/lyricbox.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("lyricbox").join("lyricbox.log"))
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg));
    }
    env::var_os("HOME").map(|home| {
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |dir, part| dir.join(part))
    })
}
