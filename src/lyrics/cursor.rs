use super::model::LyricEntry;

/// Remembers which lyric line is on screen so that only transitions
/// reach the display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LyricCursor {
    current: Option<usize>,
}

impl LyricCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the line currently shown, `None` when no line is active.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Forget the active line; used on every track change.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Move to the line active at `position_ms`.
    ///
    /// Returns `true` only when the active line changed.
    pub fn advance(&mut self, entries: &[LyricEntry], position_ms: i64) -> bool {
        let next = Self::resolve(entries, position_ms, self.current);
        if next == self.current {
            return false;
        }
        self.current = next;
        true
    }

    /// The index of the last entry whose timestamp is `<= position_ms`.
    ///
    /// `None` before the first entry (and for negative positions). Past the
    /// final timestamp the last line stays active. `previous` is only a
    /// search hint: when playback moved forward from it, the search is
    /// limited to the entries from `previous` onwards. The result never
    /// depends on the hint.
    pub fn resolve(
        entries: &[LyricEntry],
        position_ms: i64,
        previous: Option<usize>,
    ) -> Option<usize> {
        let position = u64::try_from(position_ms).ok()?;
        let started = |e: &LyricEntry| e.timestamp_ms <= position;

        if let Some(prev) = previous.filter(|&p| p < entries.len()) {
            if started(&entries[prev]) {
                let tail = &entries[prev..];
                return Some(prev + tail.partition_point(started) - 1);
            }
        }

        entries.partition_point(started).checked_sub(1)
    }
}
