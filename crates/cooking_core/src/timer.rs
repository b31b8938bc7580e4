//! Countdown clock for the step currently on screen.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running or already at zero.
    Idle,
    Ticked { remaining_seconds: u32 },
    /// This tick brought the timer to zero and stopped it.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTimer {
    duration_seconds: u32,
    remaining_seconds: u32,
    running: bool,
}

impl StepTimer {
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            running: false,
        }
    }

    pub fn for_minutes(minutes: u32) -> Self {
        Self::new(minutes.saturating_mul(60))
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Flips running state. A timer at zero cannot be started, so this is a
    /// no-op there and returns `false`.
    pub fn toggle(&mut self) -> bool {
        if self.is_expired() {
            return false;
        }
        self.running = !self.running;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.duration_seconds;
    }

    /// Replaces the configured duration, stopped and full.
    pub fn load(&mut self, duration_seconds: u32) {
        self.duration_seconds = duration_seconds;
        self.reset();
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.is_expired() {
            return TickOutcome::Idle;
        }
        self.remaining_seconds -= 1;
        if self.is_expired() {
            self.running = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Ticked {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// `MM:SS`, zero padded. Minutes are not folded into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
