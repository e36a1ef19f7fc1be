//! Opening audio files for playback.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode {path}")]
    Decode {
        path: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Open and decode `path`, returning the source and its length if known.
pub(super) fn open_source(
    path: &Path,
) -> Result<(Decoder<BufReader<File>>, Option<Duration>), SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SourceError::Decode {
        path: path.display().to_string(),
        source,
    })?;

    let duration = decoder.total_duration().or_else(|| metadata_duration(path));
    Ok((decoder, duration))
}

/// Read the track length from the file's metadata.
///
/// Streams such as VBR mp3 often do not report a length while decoding.
pub(super) fn metadata_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}
