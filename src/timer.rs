//! Single cancellable delayed task, clocked by frame delta time.
//!
//! A `DeferredTimer` holds at most one armed task. Arming always replaces
//! (cancels) the previous task, and every arm bumps a generation counter so
//! the owner can tell a fresh fire from a stale one.

use crate::constants::TIMER_EPSILON;

/// Identifies one armed task of a [`DeferredTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
}

impl TimerHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of a fired task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub handle: TimerHandle,
    /// Part of the advanced time that elapsed after the task was due
    pub overshoot: f64,
}

#[derive(Debug, Default)]
pub struct DeferredTimer {
    remaining: Option<f64>,
    generation: u64,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for `delay` seconds, cancelling any armed task.
    pub fn arm(&mut self, delay: f64) -> TimerHandle {
        self.generation += 1;
        self.remaining = Some(delay.max(0.0));
        TimerHandle { generation: self.generation }
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f64> {
        self.remaining
    }

    /// Let `dt` seconds pass. Returns the fired task, which is disarmed.
    pub fn advance(&mut self, dt: f64) -> Option<Fired> {
        let remaining = self.remaining?;
        let left = remaining - dt;
        if left > TIMER_EPSILON {
            self.remaining = Some(left);
            return None;
        }
        self.remaining = None;
        Some(Fired {
            handle: TimerHandle { generation: self.generation },
            overshoot: (-left).max(0.0),
        })
    }
}
