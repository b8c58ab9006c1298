//! Audio synchronizer: the single audio handle of a presentation.
//!
//! The platform side is provided via the [`AudioBackend`] trait. Start
//! failures (missing device, unreadable file, autoplay policy) are logged
//! and swallowed so the visual engine keeps running without sound.

mod music;
mod simulated;

use tracing::{debug, info, warn};

use crate::error::Result;

pub use music::MusicBackend;
pub use simulated::SimulatedBackend;

/// Platform audio output for one track.
pub trait AudioBackend {
    /// Bind the backend to `url`, replacing any previous track.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start playback from the current position.
    fn play(&mut self) -> Result<()>;

    /// Continue a paused track.
    fn resume(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn seek(&mut self, position_secs: f32);

    fn set_looping(&mut self, looping: bool);

    fn position(&self) -> f32;

    fn is_playing(&self) -> bool;

    /// Pump the stream; called once per frame.
    fn update(&mut self, dt: f32);

    /// Drop the bound track.
    fn release(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioStatus {
    /// No track bound yet
    Unbound,
    /// Bound, at the start or finished
    Stopped,
    Playing,
    Paused,
}

/// Snapshot of the audio handle.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioHandleState {
    pub bound_url: Option<String>,
    pub position_seconds: f32,
    pub playing: bool,
}

pub struct AudioSynchronizer<B: AudioBackend> {
    backend: B,
    url: Option<String>,
    looping: bool,
    status: AudioStatus,
    /// Set when binding failed; no further attempts are made
    unavailable: bool,
}

impl<B: AudioBackend> AudioSynchronizer<B> {
    pub fn new(backend: B, url: Option<String>, looping: bool) -> Self {
        Self {
            backend,
            url: url.filter(|url| !url.trim().is_empty()),
            looping,
            status: AudioStatus::Unbound,
            unavailable: false,
        }
    }

    pub fn has_track(&self) -> bool {
        self.url.is_some()
    }

    pub fn status(&self) -> AudioStatus {
        self.status
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn handle_state(&self) -> AudioHandleState {
        let bound = self.status != AudioStatus::Unbound;
        AudioHandleState {
            bound_url: if bound { self.url.clone() } else { None },
            position_seconds: if bound { self.backend.position() } else { 0.0 },
            playing: self.status == AudioStatus::Playing,
        }
    }

    fn ensure_bound(&mut self) -> bool {
        if self.status != AudioStatus::Unbound {
            return true;
        }
        let Some(url) = self.url.as_deref() else {
            return false;
        };
        if self.unavailable {
            return false;
        }
        match self.backend.load(url) {
            Ok(()) => {
                self.backend.set_looping(self.looping);
                self.status = AudioStatus::Stopped;
                debug!("Bound audio track {}", url);
                true
            }
            Err(e) => {
                warn!("Audio track {} unavailable, continuing without sound: {}", url, e);
                self.unavailable = true;
                false
            }
        }
    }

    /// Play from the start when stopped, continue when paused.
    pub fn start(&mut self) {
        if !self.ensure_bound() {
            return;
        }
        let result = match self.status {
            AudioStatus::Playing | AudioStatus::Unbound => return,
            AudioStatus::Stopped => {
                self.backend.seek(0.0);
                self.backend.play()
            }
            AudioStatus::Paused => self.backend.resume(),
        };
        match result {
            Ok(()) => self.status = AudioStatus::Playing,
            Err(e) => warn!("Audio playback did not start: {}", e),
        }
    }

    /// Pause, keeping the position.
    pub fn pause(&mut self) {
        if self.status == AudioStatus::Playing {
            self.backend.pause();
            self.status = AudioStatus::Paused;
        }
    }

    /// Seek to 0 and mark stopped, so the next `start` plays from the top.
    pub fn rewind(&mut self) {
        if self.status == AudioStatus::Unbound {
            return;
        }
        if self.status == AudioStatus::Playing {
            self.backend.pause();
        }
        self.backend.seek(0.0);
        self.status = AudioStatus::Stopped;
    }

    /// Replay from the start.
    pub fn restart(&mut self) {
        self.rewind();
        self.start();
    }

    /// Pump the backend and notice a track that finished on its own.
    pub fn update(&mut self, dt: f32) {
        if self.status == AudioStatus::Unbound {
            return;
        }
        self.backend.update(dt);
        if self.status == AudioStatus::Playing && !self.backend.is_playing() {
            info!("Audio track finished");
            self.status = AudioStatus::Stopped;
        }
    }

    pub fn teardown(&mut self) {
        if self.status == AudioStatus::Unbound {
            return;
        }
        self.pause();
        self.backend.release();
        self.status = AudioStatus::Unbound;
    }
}

impl<B: AudioBackend> Drop for AudioSynchronizer<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
