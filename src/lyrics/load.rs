use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::decode::decode_first;

#[derive(Debug, Error)]
pub enum LyricsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid in any of the configured encodings")]
    Undecodable { path: PathBuf },
}

impl LyricsError {
    /// True when the lyric file simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// The `.lrc` file that belongs to `audio_path` (same stem, same folder).
pub fn sidecar_path(audio_path: &Path) -> PathBuf {
    audio_path.with_extension("lrc")
}

/// Read and decode the sidecar lyric file of `audio_path`.
pub(super) fn read_sidecar(audio_path: &Path, encodings: &[String]) -> Result<String, LyricsError> {
    let path = sidecar_path(audio_path);
    let bytes = std::fs::read(&path).map_err(|source| LyricsError::Io {
        path: path.clone(),
        source,
    })?;
    decode_first(&bytes, encodings).ok_or(LyricsError::Undecodable { path })
}
