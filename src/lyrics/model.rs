use std::path::Path;

use tracing::{debug, warn};

use super::load::read_sidecar;
use super::parse::parse;

/// One displayed lyric line and the playback time it becomes active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricEntry {
    pub timestamp_ms: u64,
    pub text: String,
}

impl LyricEntry {
    pub fn new(timestamp_ms: u64, text: impl Into<String>) -> Self {
        Self {
            timestamp_ms,
            text: text.into(),
        }
    }

    /// The entry's time tag in `mm:ss.xx` form.
    pub fn tag(&self) -> String {
        format_time_tag(self.timestamp_ms)
    }
}

/// Entries of one lyric file, sorted ascending by timestamp.
///
/// Built once per track change and never mutated afterwards. An empty
/// track is the normal result for songs without a usable `.lrc` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricTrack {
    entries: Vec<LyricEntry>,
}

impl LyricTrack {
    /// Parse already-decoded lyric text.
    pub fn parse(content: &str) -> Self {
        Self {
            entries: parse(content),
        }
    }

    /// Load the sidecar lyrics of `audio_path`.
    ///
    /// Never fails: a missing, unreadable or undecodable file yields an
    /// empty track and a log line.
    pub fn load_for(audio_path: &Path, encodings: &[String]) -> Self {
        match read_sidecar(audio_path, encodings) {
            Ok(content) => {
                let track = Self::parse(&content);
                debug!(
                    audio = %audio_path.display(),
                    lines = track.len(),
                    "loaded lyrics"
                );
                track
            }
            Err(e) if e.is_missing() => {
                debug!(audio = %audio_path.display(), "no lyric file");
                Self::default()
            }
            Err(e) => {
                warn!(audio = %audio_path.display(), error = %e, "ignoring lyric file");
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[LyricEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LyricEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Format milliseconds as an LRC time tag body (`mm:ss.xx`).
///
/// Sub-centisecond precision is truncated, which is exactly what the
/// parser can represent.
pub fn format_time_tag(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let centis = (ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}
