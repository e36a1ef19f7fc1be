use std::path::Path;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// Notifications emitted by a media player.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Playback position in milliseconds.
    PositionChanged(u64),
    /// Length of the loaded track in milliseconds, once known.
    DurationChanged(u64),
    /// The loaded track played to its end.
    EndOfMedia,
    /// The track could not be opened or decoded; nothing is playing.
    LoadFailed,
}

/// A `PlayerEvent` tagged with the `load` call it belongs to.
///
/// Events of an earlier load can still be queued after the next `load`
/// returned; the load id lets the receiver tell them apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlayerNotice {
    pub load: u64,
    pub event: PlayerEvent,
}

/// The audio back-end as seen by the coordinator.
///
/// Positions and durations are milliseconds, volume is 0 to 100.
/// Implementations report progress through `PlayerNotice`s delivered on
/// whatever channel they hand to the runtime.
pub trait MediaPlayer {
    /// Replace the current track. Returns the id stamped on every notice
    /// about this track; each call returns a new id.
    fn load(&mut self, path: &Path) -> u64;
    fn play(&mut self);
    fn pause(&mut self);
    fn state(&self) -> PlayerState;
    fn position(&self) -> u64;
    fn set_position(&mut self, position_ms: u64);
    fn duration(&self) -> u64;
    fn volume(&self) -> u8;
    fn set_volume(&mut self, volume: u8);
}
