//! Time-synced lyrics.
//!
//! A `LyricTrack` is parsed from the `.lrc` sidecar of an audio file and
//! stays immutable until the next track change. `LyricCursor` maps a
//! playback position onto the line that should currently be shown.

mod cursor;
mod decode;
mod load;
mod model;
mod parse;

pub use cursor::LyricCursor;
pub use load::{LyricsError, sidecar_path};
pub use model::{LyricEntry, LyricTrack, format_time_tag};
pub use parse::parse;

#[cfg(test)]
mod tests;
