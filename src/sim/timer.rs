//! Pausable millisecond timer
//!
//! Elapsed time is measured against whatever `TickSource` is passed in, so
//! the same timer works with the wall clock or a hand-driven test clock.

use serde::{Deserialize, Serialize};

use crate::platform::TickSource;

/// Timer state; each variant carries exactly the ticks it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerState {
    #[default]
    Stopped,
    /// Running since `start` (adjusted forward on unpause)
    Running { start: u64 },
    /// Frozen at `elapsed` milliseconds
    Paused { elapsed: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timer {
    state: TimerState,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) from zero; valid from any state
    pub fn start(&mut self, clock: &impl TickSource) {
        self.state = TimerState::Running {
            start: clock.ticks(),
        };
    }

    /// Stop and clear; valid from any state
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Freeze elapsed time. No-op unless running.
    pub fn pause(&mut self, clock: &impl TickSource) {
        if let TimerState::Running { start } = self.state {
            self.state = TimerState::Paused {
                elapsed: clock.ticks().saturating_sub(start),
            };
        }
    }

    /// Resume from the frozen value. No-op unless paused.
    pub fn unpause(&mut self, clock: &impl TickSource) {
        if let TimerState::Paused { elapsed } = self.state {
            self.state = TimerState::Running {
                start: clock.ticks().saturating_sub(elapsed),
            };
        }
    }

    /// Milliseconds counted so far (0 when stopped)
    pub fn elapsed(&self, clock: &impl TickSource) -> u64 {
        match self.state {
            TimerState::Stopped => 0,
            TimerState::Running { start } => clock.ticks().saturating_sub(start),
            TimerState::Paused { elapsed } => elapsed,
        }
    }

    /// Running or paused
    pub fn is_started(&self) -> bool {
        !matches!(self.state, TimerState::Stopped)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused { .. })
    }

    pub fn state(&self) -> TimerState {
        self.state
    }
}
