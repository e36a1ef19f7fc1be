//! rodio-backed media player.
//!
//! All output-device work happens on a dedicated worker thread. The
//! `AudioPlayer` handle talks to it over a command channel, mirrors its
//! state in a shared `PlaybackInfo` and hands `PlayerEvent`s back to the
//! runtime on a second channel.

mod player;
mod source;
mod thread;
mod types;

pub use player::{AudioError, AudioPlayer};

#[cfg(test)]
mod tests;
