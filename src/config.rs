//! Layered settings for lyricbox.
//!
//! Struct defaults, then an optional TOML file, then `LYRICBOX__*`
//! environment variables. Also knows the XDG locations of the playlist
//! and log files.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
