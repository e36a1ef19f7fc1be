use std::time::{Duration, Instant};

/// Cadence of lyric polling.
///
/// Polls every `active` interval while playing and every `idle` interval
/// otherwise. A suspended poller never fires; it is suspended for the
/// length of a seek gesture.
#[derive(Debug, Clone)]
pub struct LyricPoller {
    active: Duration,
    idle: Duration,
    suspended: bool,
    last_poll: Option<Instant>,
}

impl LyricPoller {
    pub fn new(active: Duration, idle: Duration) -> Self {
        Self {
            active,
            idle,
            suspended: false,
            last_poll: None,
        }
    }

    pub fn interval(&self, playing: bool) -> Duration {
        if playing { self.active } else { self.idle }
    }

    /// True if a poll is due at `now`; records the poll when it is.
    pub fn due(&mut self, now: Instant, playing: bool) -> bool {
        if self.suspended {
            return false;
        }
        let due = match self.last_poll {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval(playing),
        };
        if due {
            self.last_poll = Some(now);
        }
        due
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Leave the suspended state, counting `now` as the latest poll.
    pub fn resume(&mut self, now: Instant) {
        self.suspended = false;
        self.last_poll = Some(now);
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Time left until the next poll, `None` while suspended.
    pub fn time_until(&self, now: Instant, playing: bool) -> Option<Duration> {
        if self.suspended {
            return None;
        }
        Some(match self.last_poll {
            None => Duration::ZERO,
            Some(last) => (last + self.interval(playing)).saturating_duration_since(now),
        })
    }
}
