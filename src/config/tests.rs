use super::load::{default_config_path, default_log_path, default_playlist_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

/// Point the loader at `contents` written to a temp file and clear the
/// overrides other tests might set.
fn load_from(contents: &str) -> Settings {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, contents).unwrap();

    let _g1 = EnvGuard::set("LYRICBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("LYRICBOX__PLAYBACK__VOLUME");
    let _g3 = EnvGuard::remove("LYRICBOX__LYRICS__ENCODINGS");
    Settings::load().unwrap()
}

#[test]
fn resolve_config_path_prefers_lyricbox_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LYRICBOX_CONFIG_PATH", "/tmp/lyricbox-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/lyricbox-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("lyricbox")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.config/lyricbox/config.toml")
    );
}

#[test]
fn data_and_state_paths_follow_xdg_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");
    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_playlist_path().unwrap(),
        PathBuf::from("/tmp/xdg-data/lyricbox/play_list.txt")
    );
    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/lyricbox/lyricbox.log")
    );
}

#[test]
fn empty_xdg_variable_is_ignored() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_playlist_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/share/lyricbox/play_list.txt")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.playback.volume, 30);
    assert_eq!(s.playback.lyric_poll_ms, 100);
    assert_eq!(s.playback.idle_poll_ms, 1500);
    assert_eq!(s.playlist.extension, "mp3");
    assert_eq!(s.lyrics.encodings[0], "utf-8");
    assert!(s.ui.show_playlist);
    assert!(!s.ui.show_overlay);
    assert_eq!(s.log.level, "info");
}

#[test]
fn default_encodings_are_known_labels() {
    for label in LyricsSettings::default().encodings {
        assert!(
            encoding_rs::Encoding::for_label(label.as_bytes()).is_some(),
            "{label} is not a known encoding label"
        );
    }
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let s = load_from(
        r#"
[playback]
shuffle = true
volume = 55
volume_step = 5
lyric_poll_ms = 50
idle_poll_ms = 1000
seek_step_ms = 2500
seek_commit_ms = 250

[playlist]
path = "/tmp/lyricbox-list.txt"
extension = "flac"

[lyrics]
encodings = ["utf-8", "shift_jis"]
missing_placeholder = "(no lyrics)"
label_fade_ms = 300
overlay_fade_ms = 200

[ui]
show_playlist = false
show_overlay = true
ready_text = "hello"
sequential_text = "in order"
shuffle_text = "random"

[log]
level = "debug"
file = "/tmp/lyricbox.log"
"#,
    );

    assert!(s.playback.shuffle);
    assert_eq!(s.playback.volume, 55);
    assert_eq!(s.playback.volume_step, 5);
    assert_eq!(s.playback.lyric_poll_ms, 50);
    assert_eq!(s.playback.idle_poll_ms, 1000);
    assert_eq!(s.playback.seek_step_ms, 2500);
    assert_eq!(s.playback.seek_commit_ms, 250);
    assert_eq!(s.playlist.path, PathBuf::from("/tmp/lyricbox-list.txt"));
    assert_eq!(s.playlist.extension, "flac");
    assert_eq!(s.lyrics.encodings, vec!["utf-8".to_string(), "shift_jis".to_string()]);
    assert_eq!(s.lyrics.missing_placeholder, "(no lyrics)");
    assert_eq!(s.lyrics.label_fade_ms, 300);
    assert_eq!(s.lyrics.overlay_fade_ms, 200);
    assert!(!s.ui.show_playlist);
    assert!(s.ui.show_overlay);
    assert_eq!(s.ui.ready_text, "hello");
    assert_eq!(s.ui.sequential_text, "in order");
    assert_eq!(s.ui.shuffle_text, "random");
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.log_file(), Some(PathBuf::from("/tmp/lyricbox.log")));
}

#[test]
fn partial_config_keeps_other_defaults() {
    let _lock = env_lock();

    let s = load_from(
        r#"
[ui]
ready_text = "go"
"#,
    );
    assert_eq!(s.ui.ready_text, "go");
    assert_eq!(s.ui.shuffle_text, "Shuffle");
    assert_eq!(s.playback.seek_step_ms, 5000);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LYRICBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("LYRICBOX__PLAYBACK__VOLUME", "12");
    let _g3 = EnvGuard::set("LYRICBOX__LYRICS__ENCODINGS", "gbk,utf-8");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 12);
    assert_eq!(s.lyrics.encodings, vec!["gbk".to_string(), "utf-8".to_string()]);
}

#[test]
fn validate_rejects_nonsense() {
    let mut s = Settings::default();
    s.playback.lyric_poll_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.lyrics.encodings.clear();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playlist.extension = ".".to_string();
    assert!(s.validate().is_err());
}
