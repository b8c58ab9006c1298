use crate::audio::AudioBackend;
use crate::error::{Result, SlideshowError};

/// In-memory audio clock. Stands in for a device when running muted.
#[derive(Debug, Default)]
pub struct SimulatedBackend {
    loaded: Option<String>,
    /// Track length in seconds; `None` plays forever
    length: Option<f32>,
    position: f32,
    playing: bool,
    looping: bool,
    fail_load: bool,
    autoplay_blocked: bool,
    loads: usize,
}

impl SimulatedBackend {
    pub fn with_length(length: f32) -> Self {
        Self { length: Some(length), ..Self::default() }
    }

    /// Backend whose `load` always fails.
    pub fn failing() -> Self {
        Self { fail_load: true, ..Self::default() }
    }

    /// Make `play` fail the way a browser autoplay policy would.
    pub fn block_autoplay(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl AudioBackend for SimulatedBackend {
    fn load(&mut self, url: &str) -> Result<()> {
        self.loads += 1;
        if self.fail_load {
            return Err(SlideshowError::Audio(format!("cannot open {url}")));
        }
        self.loaded = Some(url.to_string());
        self.position = 0.0;
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.loaded.is_none() {
            return Err(SlideshowError::Audio("no track loaded".into()));
        }
        if self.autoplay_blocked {
            return Err(SlideshowError::Audio("playback blocked".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.play()
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position_secs: f32) {
        self.position = position_secs.max(0.0);
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn position(&self) -> f32 {
        self.position
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.position += dt;
        if let Some(length) = self.length {
            if self.position >= length {
                if self.looping && length > 0.0 {
                    self.position %= length;
                } else {
                    self.position = length;
                    self.playing = false;
                }
            }
        }
    }

    fn release(&mut self) {
        self.loaded = None;
        self.playing = false;
        self.position = 0.0;
    }
}
