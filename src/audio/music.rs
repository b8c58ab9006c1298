use raylib::prelude::*;

use crate::audio::AudioBackend;
use crate::error::{Result, SlideshowError};
use crate::sequence::is_remote_url;

/// raylib music stream. Without an audio device every load fails, which
/// the synchronizer treats as "play silently".
pub struct MusicBackend<'aud> {
    device: Option<&'aud RaylibAudio>,
    music: Option<Music<'aud>>,
    looping: bool,
}

impl<'aud> MusicBackend<'aud> {
    pub fn new(device: Option<&'aud RaylibAudio>) -> Self {
        Self { device, music: None, looping: false }
    }
}

impl AudioBackend for MusicBackend<'_> {
    fn load(&mut self, url: &str) -> Result<()> {
        let device = self
            .device
            .ok_or_else(|| SlideshowError::Audio("no audio device".into()))?;
        if is_remote_url(url) {
            return Err(SlideshowError::Audio(format!("remote audio is not streamed: {url}")));
        }
        let mut music = device
            .new_music(url)
            .map_err(|e| SlideshowError::Audio(format!("{url}: {e}")))?;
        music.looping = self.looping;
        self.music = Some(music);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let music = self
            .music
            .as_ref()
            .ok_or_else(|| SlideshowError::Audio("no track loaded".into()))?;
        music.play_stream();
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        let music = self
            .music
            .as_ref()
            .ok_or_else(|| SlideshowError::Audio("no track loaded".into()))?;
        music.resume_stream();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(music) = self.music.as_ref() {
            music.pause_stream();
        }
    }

    fn seek(&mut self, position_secs: f32) {
        if let Some(music) = self.music.as_ref() {
            music.seek_stream(position_secs);
        }
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        if let Some(music) = self.music.as_mut() {
            music.looping = looping;
        }
    }

    fn position(&self) -> f32 {
        self.music.as_ref().map(|music| music.get_time_played()).unwrap_or(0.0)
    }

    fn is_playing(&self) -> bool {
        self.music.as_ref().map(|music| music.is_stream_playing()).unwrap_or(false)
    }

    fn update(&mut self, _dt: f32) {
        if let Some(music) = self.music.as_ref() {
            music.update_stream();
        }
    }

    fn release(&mut self) {
        if let Some(music) = self.music.take() {
            music.stop_stream();
        }
    }
}
