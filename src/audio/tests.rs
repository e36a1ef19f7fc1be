use std::path::Path;
use std::time::Duration;

use super::source::{SourceError, open_source, metadata_duration};
use super::thread::duration_millis;
use super::types::{PlaybackInfo, volume_to_gain};
use crate::playback::PlayerState;

#[test]
fn volume_maps_linearly_onto_gain() {
    assert_eq!(volume_to_gain(0), 0.0);
    assert_eq!(volume_to_gain(50), 0.5);
    assert_eq!(volume_to_gain(100), 1.0);
}

#[test]
fn volume_above_hundred_is_clamped() {
    assert_eq!(volume_to_gain(255), 1.0);
}

#[test]
fn playback_info_starts_stopped_at_full_volume() {
    let info = PlaybackInfo::default();
    assert_eq!(info.state, PlayerState::Stopped);
    assert_eq!(info.position_ms, 0);
    assert_eq!(info.duration_ms, 0);
    assert_eq!(info.volume, 100);
}

#[test]
fn missing_file_fails_to_open() {
    let err = open_source(Path::new("/definitely/not/here.mp3")).err();
    assert!(matches!(err, Some(SourceError::Open { .. })));
}

#[test]
fn non_audio_file_fails_to_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.mp3");
    std::fs::write(&path, "this is not audio at all").unwrap();

    let err = open_source(&path).err();
    assert!(matches!(err, Some(SourceError::Decode { .. })));
    assert_eq!(metadata_duration(&path), None);
}

#[test]
fn metadata_duration_of_missing_file_is_none() {
    assert_eq!(metadata_duration(Path::new("/definitely/not/here.mp3")), None);
}

#[test]
fn duration_millis_truncates_sub_millisecond_part() {
    assert_eq!(duration_millis(Duration::from_micros(1_500_900)), 1500);
    assert_eq!(duration_millis(Duration::ZERO), 0);
}
