//! Playback scheduler: drives the current slide forward on a timer.
//!
//! The first and last slide dwell `duration + 1.5` seconds, interior slides
//! dwell exactly `duration`. Exactly one advance task is armed at a time;
//! arming always cancels the previous task, and a fired task re-checks that
//! playback is still running before it touches the index.
//!
//! Automatic and manual forward steps share one `advance` primitive, so
//! end-of-cycle detection is identical on both paths: stepping past the
//! last slide stops playback, keeps the last slide visible and emits
//! [`PlaybackEvent::Ended`].

use tracing::{debug, info};

use crate::audio::{AudioBackend, AudioSynchronizer};
use crate::constants::AUDIO_GRACE_DELAY;
use crate::events::PlaybackEvent;
use crate::sequence::{EndedMetadata, SlideSequence, dwell_for};
use crate::state::{PlaybackState, PlaybackStatus};
use crate::timer::{DeferredTimer, TimerHandle};

pub struct PlaybackScheduler<B: AudioBackend> {
    state: PlaybackState,
    slide_count: usize,
    base_duration: f64,
    loop_audio: bool,
    metadata: EndedMetadata,
    audio: AudioSynchronizer<B>,
    /// Grace delay between the visual start and the audio start
    audio_kick: DeferredTimer,
    events: Vec<PlaybackEvent>,
}

impl<B: AudioBackend> PlaybackScheduler<B> {
    pub fn new(sequence: &SlideSequence, backend: B, share_base_url: Option<&str>) -> Self {
        Self {
            state: PlaybackState::new(),
            slide_count: sequence.len(),
            base_duration: sequence.effective_duration(),
            loop_audio: sequence.loop_audio_independently,
            metadata: sequence.ended_metadata(share_base_url),
            audio: AudioSynchronizer::new(
                backend,
                sequence.audio_url.clone(),
                sequence.loop_audio_independently,
            ),
            audio_kick: DeferredTimer::new(),
            events: Vec::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn has_pending_advance(&self) -> bool {
        self.state.pending_advance.is_armed()
    }

    /// Seconds until the armed advance fires.
    pub fn pending_remaining(&self) -> Option<f64> {
        self.state.pending_advance.remaining()
    }

    pub fn audio(&self) -> &AudioSynchronizer<B> {
        &self.audio
    }

    pub fn metadata(&self) -> &EndedMetadata {
        &self.metadata
    }

    pub fn dwell_for(&self, index: usize) -> f64 {
        dwell_for(index, self.slide_count, self.base_duration)
    }

    /// Events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn start(&mut self) {
        if self.slide_count == 0 {
            debug!("Ignoring start on an empty sequence");
            return;
        }
        self.state.pending_advance.cancel();
        self.state.status = PlaybackStatus::Playing;
        if self.audio.has_track() {
            self.audio_kick.arm(AUDIO_GRACE_DELAY);
        }
        self.arm_advance();
        info!("Playback started on slide {}", self.state.current_index);
        self.events.push(PlaybackEvent::Started { index: self.state.current_index });
    }

    pub fn pause(&mut self) {
        self.state.pending_advance.cancel();
        self.audio_kick.cancel();
        if self.state.is_playing() {
            self.state.status = PlaybackStatus::Paused;
            info!("Playback paused on slide {}", self.state.current_index);
            self.events.push(PlaybackEvent::Paused { index: self.state.current_index });
        }
        self.audio.pause();
    }

    /// Play/pause switch. After the show ended on its last slide this
    /// starts over from the first slide.
    pub fn toggle(&mut self) {
        match self.state.status {
            PlaybackStatus::Playing => self.pause(),
            PlaybackStatus::Ended if self.state.current_index + 1 == self.slide_count => {
                self.restart()
            }
            _ => self.start(),
        }
    }

    /// Manual forward step, with the same end detection as the timer.
    pub fn next(&mut self) {
        self.advance();
    }

    /// Manual backward step; wraps from the first to the last slide.
    pub fn previous(&mut self) {
        if self.slide_count == 0 {
            return;
        }
        let target = (self.state.current_index + self.slide_count - 1) % self.slide_count;
        self.jump_to(target);
    }

    /// Jump to `index` (clamped to the last slide). Never ends the show.
    pub fn seek(&mut self, index: usize) {
        if self.slide_count == 0 {
            return;
        }
        self.jump_to(index.min(self.slide_count - 1));
    }

    pub fn restart(&mut self) {
        self.pause();
        let from = self.state.current_index;
        self.state.current_index = 0;
        self.audio.rewind();
        if from != 0 {
            self.events.push(PlaybackEvent::SlideChanged { from, to: 0 });
        }
        self.start();
    }

    /// Let `dt` seconds of wall time pass.
    pub fn update(&mut self, dt: f64) {
        if self.audio_kick.advance(dt).is_some() && self.state.is_playing() {
            self.audio.start();
        }

        let mut budget = dt;
        while let Some(fired) = self.state.pending_advance.advance(budget) {
            // Time past the deadline counts toward the next slide
            budget = fired.overshoot;
            self.on_advance_due(fired.handle);
        }

        self.audio.update(dt as f32);
    }

    /// Cancel everything and release the audio handle.
    pub fn teardown(&mut self) {
        self.state.pending_advance.cancel();
        self.audio_kick.cancel();
        if self.state.is_playing() {
            self.state.status = PlaybackStatus::Paused;
        }
        self.audio.teardown();
    }

    fn arm_advance(&mut self) {
        let dwell = self.dwell_for(self.state.current_index);
        let handle = self.state.pending_advance.arm(dwell);
        debug!(
            "Slide {} dwells {:.2}s (timer #{})",
            self.state.current_index,
            dwell,
            handle.generation()
        );
    }

    fn on_advance_due(&mut self, handle: TimerHandle) {
        if !self.state.is_playing() {
            debug!("Dropping stale advance #{}", handle.generation());
            return;
        }
        self.advance();
    }

    fn advance(&mut self) {
        let len = self.slide_count;
        if len == 0 {
            return;
        }
        let current = self.state.current_index;
        let next = (current + 1) % len;
        if next == 0 && current == len - 1 {
            if self.state.status != PlaybackStatus::Ended {
                self.finish();
            }
            return;
        }
        self.state.current_index = next;
        self.events.push(PlaybackEvent::SlideChanged { from: current, to: next });
        if self.state.is_playing() {
            self.arm_advance();
        }
    }

    fn jump_to(&mut self, target: usize) {
        let from = self.state.current_index;
        if target == from {
            return;
        }
        self.state.current_index = target;
        // Leaving the end card; the next wrap past the last slide ends again
        if self.state.status == PlaybackStatus::Ended {
            self.state.status = PlaybackStatus::Paused;
        }
        self.events.push(PlaybackEvent::SlideChanged { from, to: target });
        if self.state.is_playing() {
            self.arm_advance();
        }
    }

    fn finish(&mut self) {
        self.state.pending_advance.cancel();
        self.audio_kick.cancel();
        self.state.status = PlaybackStatus::Ended;
        if !self.loop_audio {
            self.audio.pause();
        }
        info!("Slideshow ended on slide {}", self.state.current_index);
        self.events.push(PlaybackEvent::Ended(self.metadata.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioStatus, SimulatedBackend};

    fn sequence(len: usize, duration: f64) -> SlideSequence {
        let mut sequence = SlideSequence::draft();
        sequence.slide_urls = (0..len).map(|i| format!("slide{i}.jpg")).collect();
        sequence.slide_duration_seconds = duration;
        sequence
    }

    fn scheduler(len: usize, duration: f64) -> PlaybackScheduler<SimulatedBackend> {
        PlaybackScheduler::new(&sequence(len, duration), SimulatedBackend::default(), None)
    }

    fn ended_count(events: &[PlaybackEvent]) -> usize {
        events.iter().filter(|e| matches!(e, PlaybackEvent::Ended(_))).count()
    }

    #[test]
    fn empty_sequence_never_arms() {
        let mut s = scheduler(0, 4.0);
        s.start();
        s.update(100.0);
        s.next();
        s.previous();
        s.seek(3);
        s.restart();
        assert!(!s.has_pending_advance());
        assert_eq!(s.status(), PlaybackStatus::Idle);
        assert_eq!(s.current_index(), 0);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn three_slide_show_timeline() {
        let mut s = scheduler(3, 4.0);
        s.start();
        s.update(5.499);
        assert_eq!(s.current_index(), 0);
        s.update(0.001);
        assert_eq!(s.current_index(), 1);
        s.update(3.999);
        assert_eq!(s.current_index(), 1);
        s.update(0.001);
        assert_eq!(s.current_index(), 2);
        s.update(5.499);
        assert_eq!(s.status(), PlaybackStatus::Playing);
        s.update(0.001);
        assert_eq!(s.current_index(), 2);
        assert_eq!(s.status(), PlaybackStatus::Ended);
        assert!(!s.has_pending_advance());

        let events = s.drain_events();
        assert_eq!(ended_count(&events), 1);
        s.update(60.0);
        assert_eq!(s.current_index(), 2);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn large_update_carries_overshoot() {
        let mut s = scheduler(3, 4.0);
        s.start();
        // 5.5 + 4.0 = 9.5: a single big step lands exactly on slide 2
        s.update(9.5);
        assert_eq!(s.current_index(), 2);
        assert!((s.pending_remaining().unwrap() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn stale_fire_after_pause_is_ignored() {
        let mut s = scheduler(3, 4.0);
        s.start();
        s.update(5.0);
        s.pause();
        assert!(!s.has_pending_advance());
        s.update(30.0);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn rapid_start_pause_keeps_single_timer() {
        let mut s = scheduler(4, 2.0);
        for _ in 0..10 {
            s.start();
            s.pause();
            s.start();
        }
        assert!(s.has_pending_advance());
        // Slide 0 dwells 3.5s; a doubled timer would have moved further
        s.update(3.5);
        assert_eq!(s.current_index(), 1);
        s.update(1.9);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn manual_next_on_last_slide_ends_without_moving() {
        let mut s = scheduler(3, 4.0);
        s.seek(2);
        s.drain_events();
        s.next();
        assert_eq!(s.current_index(), 2);
        assert_eq!(ended_count(&s.drain_events()), 1);
    }

    #[test]
    fn previous_on_first_slide_wraps_silently() {
        let mut s = scheduler(3, 4.0);
        s.start();
        s.drain_events();
        s.previous();
        assert_eq!(s.current_index(), 2);
        let events = s.drain_events();
        assert_eq!(ended_count(&events), 0);
        assert_eq!(events, vec![PlaybackEvent::SlideChanged { from: 0, to: 2 }]);
        assert!(s.is_playing());
    }

    #[test]
    fn manual_next_rearms_in_flight_timer() {
        let mut s = scheduler(4, 4.0);
        s.start();
        s.update(5.0);
        s.next();
        assert_eq!(s.current_index(), 1);
        // The old timer had 0.5s left; the new slide owes a full 4s
        s.update(1.0);
        assert_eq!(s.current_index(), 1);
        s.update(3.0);
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn restart_resets_index_and_audio() {
        let mut sequence = sequence(3, 4.0);
        sequence.audio_url = Some("song.ogg".into());
        let mut s = PlaybackScheduler::new(&sequence, SimulatedBackend::with_length(60.0), None);
        s.start();
        s.update(7.0);
        assert_eq!(s.current_index(), 1);
        assert!(s.audio().handle_state().position_seconds > 6.0);

        s.restart();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.audio().handle_state().position_seconds, 0.0);
        assert!(s.is_playing());
        s.update(0.2);
        assert_eq!(s.audio().status(), AudioStatus::Playing);
    }

    #[test]
    fn audio_waits_for_grace_delay() {
        let mut sequence = sequence(2, 4.0);
        sequence.audio_url = Some("song.ogg".into());
        let mut s = PlaybackScheduler::new(&sequence, SimulatedBackend::with_length(60.0), None);
        s.start();
        assert_eq!(s.audio().status(), AudioStatus::Unbound);
        s.update(AUDIO_GRACE_DELAY / 2.0);
        assert_eq!(s.audio().status(), AudioStatus::Unbound);
        s.update(AUDIO_GRACE_DELAY);
        assert_eq!(s.audio().status(), AudioStatus::Playing);
    }

    #[test]
    fn end_pauses_audio_unless_looping_independently() {
        let mut sequence = sequence(1, 1.0);
        sequence.audio_url = Some("song.ogg".into());
        let mut s = PlaybackScheduler::new(&sequence, SimulatedBackend::with_length(60.0), None);
        s.start();
        s.update(3.0);
        assert_eq!(s.status(), PlaybackStatus::Ended);
        assert_eq!(s.audio().status(), AudioStatus::Paused);

        sequence.loop_audio_independently = true;
        let mut s = PlaybackScheduler::new(&sequence, SimulatedBackend::with_length(60.0), None);
        s.start();
        s.update(3.0);
        assert_eq!(s.status(), PlaybackStatus::Ended);
        assert_eq!(s.audio().status(), AudioStatus::Playing);
        assert!(s.audio().backend().is_looping());
    }

    #[test]
    fn toggle_after_end_starts_over() {
        let mut s = scheduler(2, 1.0);
        s.start();
        s.update(5.0);
        assert_eq!(s.status(), PlaybackStatus::Ended);
        s.toggle();
        assert_eq!(s.current_index(), 0);
        assert!(s.is_playing());
        s.toggle();
        assert_eq!(s.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn seek_clamps_and_never_ends() {
        let mut s = scheduler(3, 4.0);
        s.seek(99);
        assert_eq!(s.current_index(), 2);
        s.seek(2);
        let events = s.drain_events();
        assert_eq!(events, vec![PlaybackEvent::SlideChanged { from: 0, to: 2 }]);
    }

    #[test]
    fn teardown_cancels_and_releases() {
        let mut sequence = sequence(3, 4.0);
        sequence.audio_url = Some("song.ogg".into());
        let mut s = PlaybackScheduler::new(&sequence, SimulatedBackend::with_length(60.0), None);
        s.start();
        s.update(1.0);
        s.teardown();
        assert!(!s.has_pending_advance());
        assert!(!s.audio().backend().is_loaded());
        s.update(10.0);
        assert_eq!(s.current_index(), 0);
    }
}
