use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

/// Whole-second countdown driven by an external clock.
///
/// Each full second since the last decrement removes one second. The
/// decrement timestamp advances by exactly one second per step, so a long
/// frame catches up instead of drifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    length: u32,
    seconds_left: u32,
    last_decrement: Duration,
}

impl Countdown {
    pub fn new(length: u32, now: Duration) -> Self {
        Self {
            length,
            seconds_left: length,
            last_decrement: now,
        }
    }

    pub fn restart(&mut self, now: Duration) {
        self.seconds_left = self.length;
        self.last_decrement = now;
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn is_expired(&self) -> bool {
        self.seconds_left == 0
    }

    /// Returns `true` on the call that brings the countdown to zero.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.is_expired() {
            return false;
        }

        while self.seconds_left > 0 && now.saturating_sub(self.last_decrement) >= TICK {
            self.seconds_left -= 1;
            self.last_decrement += TICK;
        }

        self.is_expired()
    }
}
