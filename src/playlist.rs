//! The playlist: an ordered, duplicate-free list of track paths backed by
//! a flat append-only file, plus the next/previous/shuffle selection
//! policy.

mod drop;
mod model;
mod state;
mod store;

pub use drop::{absolute_path, accepts_extension, dropped_paths};
pub use model::Track;
pub use state::{PlaylistError, PlaylistState};
pub use store::{AppendOutcome, PlaylistStore, StoreError};
