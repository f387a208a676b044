//! Rest timer: an independent countdown state machine.
//!
//! The timer owns no schedule of its own. A driver delivers one `tick` per
//! elapsed second while the state is `Running` and must stop ticking the
//! moment the timer goes `Idle`, so a finished or reset timer never leaves a
//! periodic callback behind. State is session-local and never persisted.

/// Countdown state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestTimerState {
    Idle,
    Running { remaining: u32 },
}

/// The rest timer state machine
#[derive(Clone, Debug)]
pub struct RestTimer {
    state: RestTimerState,
}

impl RestTimer {
    pub fn new() -> Self {
        Self {
            state: RestTimerState::Idle,
        }
    }

    pub fn state(&self) -> RestTimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RestTimerState::Running { .. })
    }

    /// Seconds left, 0 when idle
    pub fn remaining(&self) -> u32 {
        match self.state {
            RestTimerState::Idle => 0,
            RestTimerState::Running { remaining } => remaining,
        }
    }

    /// Begin a countdown, replacing any running one (no stacking)
    pub fn start(&mut self, seconds: u32) {
        self.state = if seconds == 0 {
            RestTimerState::Idle
        } else {
            RestTimerState::Running { remaining: seconds }
        };
    }

    /// One elapsed second; transitions to Idle when the countdown hits 0
    pub fn tick(&mut self) -> RestTimerState {
        if let RestTimerState::Running { remaining } = self.state {
            let remaining = remaining.saturating_sub(1);
            self.state = if remaining == 0 {
                RestTimerState::Idle
            } else {
                RestTimerState::Running { remaining }
            };
        }
        self.state
    }

    /// Force Idle from any state
    pub fn reset(&mut self) {
        self.state = RestTimerState::Idle;
    }
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}
