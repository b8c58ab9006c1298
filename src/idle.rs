//! Idle activity tracker: hides the transport controls after a quiet
//! period without pointer activity. Has no effect on playback.

use crate::constants::IDLE_HIDE_DELAY;
use crate::timer::DeferredTimer;

#[derive(Debug)]
pub struct IdleActivityTracker {
    controls_visible: bool,
    quiet: DeferredTimer,
    hide_after: f64,
}

impl IdleActivityTracker {
    pub fn new() -> Self {
        Self::with_delay(IDLE_HIDE_DELAY)
    }

    pub fn with_delay(hide_after: f64) -> Self {
        Self {
            controls_visible: true,
            quiet: DeferredTimer::new(),
            hide_after,
        }
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn pointer_activity(&mut self) {
        self.controls_visible = true;
        self.quiet.arm(self.hide_after);
    }

    /// Pointer left the presentation surface.
    pub fn pointer_left(&mut self) {
        self.quiet.cancel();
        self.controls_visible = false;
    }

    pub fn update(&mut self, dt: f64) {
        if self.quiet.advance(dt).is_some() {
            self.controls_visible = false;
        }
    }
}

impl Default for IdleActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}
