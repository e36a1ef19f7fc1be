use std::time::{Duration, Instant};

/// A seek in progress: the position the user is scrubbing towards and
/// the moment it gets committed if nothing else happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekGesture {
    target_ms: u64,
    commit_at: Instant,
}

impl SeekGesture {
    pub fn start(from_ms: u64, delta_ms: i64, duration_ms: u64, now: Instant, hold: Duration) -> Self {
        let mut gesture = Self {
            target_ms: from_ms,
            commit_at: now + hold,
        };
        gesture.nudge(delta_ms, duration_ms, now, hold);
        gesture
    }

    /// Move the target by `delta_ms` and push the commit deadline back.
    ///
    /// The target stays within `[0, duration_ms]`; an unknown (zero)
    /// duration only bounds it below.
    pub fn nudge(&mut self, delta_ms: i64, duration_ms: u64, now: Instant, hold: Duration) {
        let moved = if delta_ms < 0 {
            self.target_ms.saturating_sub(delta_ms.unsigned_abs())
        } else {
            self.target_ms.saturating_add(delta_ms.unsigned_abs())
        };
        self.target_ms = if duration_ms > 0 {
            moved.min(duration_ms)
        } else {
            moved
        };
        self.commit_at = now + hold;
    }

    pub fn target_ms(&self) -> u64 {
        self.target_ms
    }

    pub fn commit_at(&self) -> Instant {
        self.commit_at
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.commit_at
    }
}
