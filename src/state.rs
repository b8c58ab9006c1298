use crate::timer::DeferredTimer;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PlaybackStatus {
    Idle,    // Mounted, never started
    Playing, // Advancing on the timer
    Paused,  // Held by the viewer
    Ended,   // Stopped after a full forward cycle
}

/// Mutable playback state, owned by the scheduler.
#[derive(Debug)]
pub struct PlaybackState {
    pub current_index: usize,
    pub status: PlaybackStatus,
    pub pending_advance: DeferredTimer,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            status: PlaybackStatus::Idle,
            pending_advance: DeferredTimer::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
