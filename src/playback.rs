//! Playback coordination.
//!
//! `PlaybackCoordinator` ties the playlist, the lyrics of the current track
//! and two collaborators together: a `MediaPlayer` that actually produces
//! sound and a `PlayerView` that shows status, lyrics and progress. Both
//! collaborators are traits so the coordinator can be driven by fakes in
//! tests.

mod coordinator;
mod player;
mod poller;
mod seek;
mod view;

pub use coordinator::{PlaybackCoordinator, PlaybackState};
pub use player::{MediaPlayer, PlayerEvent, PlayerNotice, PlayerState};
pub use poller::LyricPoller;
pub use seek::SeekGesture;
pub use view::{PlayerView, format_clock};
