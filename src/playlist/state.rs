use rand::Rng;
use thiserror::Error;
use tracing::{error, info, warn};

use super::model::Track;
use super::store::{AppendOutcome, PlaylistStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("track index {index} is out of range (playlist has {len} tracks)")]
    OutOfRange { index: usize, len: usize },

    #[error("the playlist is empty")]
    Empty,
}

/// Ordered playlist, current position and shuffle flag.
///
/// Sequential navigation wraps around at both ends. With shuffle on,
/// `next` and `previous` pick uniformly among every index except the
/// current one.
pub struct PlaylistState {
    tracks: Vec<Track>,
    current: Option<usize>,
    shuffle: bool,
    store: PlaylistStore,
}

impl PlaylistState {
    /// Build the playlist from whatever `store` currently holds.
    ///
    /// A read failure is logged and leaves the playlist empty.
    pub fn load(store: PlaylistStore) -> Self {
        let mut state = Self {
            tracks: Vec::new(),
            current: None,
            shuffle: false,
            store,
        };
        state.reload();
        state
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    /// Flip shuffle mode. The current index is left alone.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    /// Add `path` unless it is already listed, persisting it immediately.
    ///
    /// On success the in-memory list is reloaded from the store. When the
    /// store cannot be written the track is still added in memory so that
    /// it can be played this session.
    pub fn append(&mut self, path: &str) -> AppendOutcome {
        if self.tracks.iter().any(|t| t.path() == path) {
            info!(path, "track already in playlist");
            return AppendOutcome::AlreadyPresent;
        }

        match self.store.append(path) {
            Ok(outcome) => {
                self.reload();
                if !self.tracks.iter().any(|t| t.path() == path) {
                    // Reload failed after a successful write; keep memory in step.
                    self.tracks.push(Track::new(path));
                }
                if outcome == AppendOutcome::Added {
                    info!(path, "added track to playlist");
                }
                outcome
            }
            Err(e) => {
                error!(error = %e, "could not persist playlist entry");
                self.tracks.push(Track::new(path));
                AppendOutcome::Added
            }
        }
    }

    /// Replace the in-memory list with the store's content.
    ///
    /// The current track keeps being current if it is still listed. On a
    /// read failure the last known list stays in place.
    pub fn reload(&mut self) {
        let paths = match self.store.load() {
            Ok(paths) => paths,
            Err(e) => {
                error!(error = %e, "could not load playlist");
                return;
            }
        };

        let current_path = self.current().map(|t| t.path().to_string());
        let mut tracks: Vec<Track> = Vec::with_capacity(paths.len());
        for path in paths {
            if tracks.iter().any(|t| t.path() == path) {
                warn!(path = %path, "skipping duplicate playlist line");
                continue;
            }
            tracks.push(Track::new(path));
        }

        self.current = current_path.and_then(|p| tracks.iter().position(|t| t.path() == p));
        self.tracks = tracks;
    }

    /// Make `index` current.
    pub fn select(&mut self, index: usize) -> Result<Track, PlaylistError> {
        let track = self
            .tracks
            .get(index)
            .cloned()
            .ok_or(PlaylistError::OutOfRange {
                index,
                len: self.tracks.len(),
            })?;
        self.current = Some(index);
        Ok(track)
    }

    pub fn next(&mut self) -> Result<Track, PlaylistError> {
        self.next_with(&mut rand::rng())
    }

    pub fn previous(&mut self) -> Result<Track, PlaylistError> {
        self.previous_with(&mut rand::rng())
    }

    /// `next` with an explicit random source.
    pub fn next_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Track, PlaylistError> {
        let len = self.non_empty_len()?;
        let index = if self.shuffle {
            self.pick_other(rng)
        } else {
            match self.current {
                Some(i) => (i + 1) % len,
                None => 0,
            }
        };
        self.select(index)
    }

    /// `previous` with an explicit random source.
    pub fn previous_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Track, PlaylistError> {
        let len = self.non_empty_len()?;
        let index = if self.shuffle {
            self.pick_other(rng)
        } else {
            match self.current {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            }
        };
        self.select(index)
    }

    fn non_empty_len(&self) -> Result<usize, PlaylistError> {
        match self.tracks.len() {
            0 => Err(PlaylistError::Empty),
            len => Ok(len),
        }
    }

    /// Uniform pick among all indices except the current one. A single
    /// track picks itself.
    fn pick_other<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let len = self.tracks.len();
        match self.current.filter(|&c| c < len) {
            Some(current) if len > 1 => {
                let pick = rng.random_range(0..len - 1);
                if pick >= current { pick + 1 } else { pick }
            }
            Some(current) => current,
            None => rng.random_range(0..len),
        }
    }
}
