//! Frame-stepped playback timelines, driven the way the window loop does.

use slideshow_player::audio::AudioStatus;
use slideshow_player::constants::FRAME_TIME;
use slideshow_player::{
    PlaybackEvent, PlaybackScheduler, PlaybackStatus, SimulatedBackend, SlideSequence,
    TransitionRegistry,
};

fn sequence(len: usize, duration: f64) -> SlideSequence {
    let mut sequence = SlideSequence::draft();
    sequence.slide_urls = (0..len).map(|i| format!("photos/{i:03}.jpg")).collect();
    sequence.slide_duration_seconds = duration;
    sequence.title = Some("Summer".into());
    sequence
}

fn scheduler(len: usize, duration: f64) -> PlaybackScheduler<SimulatedBackend> {
    PlaybackScheduler::new(&sequence(len, duration), SimulatedBackend::with_length(120.0), None)
}

/// Step frames until `done` holds; returns the number of frames stepped.
fn frames_until<F>(s: &mut PlaybackScheduler<SimulatedBackend>, limit: usize, done: F) -> Option<usize>
where
    F: Fn(&PlaybackScheduler<SimulatedBackend>) -> bool,
{
    for frame in 1..=limit {
        s.update(FRAME_TIME as f64);
        if done(s) {
            return Some(frame);
        }
    }
    None
}

#[test]
fn three_slides_at_sixty_fps() {
    let mut s = scheduler(3, 4.0);
    s.start();

    // 5.5s on the first slide, 4s in the middle, 5.5s on the last
    assert_eq!(frames_until(&mut s, 1000, |s| s.current_index() == 1), Some(330));
    assert_eq!(frames_until(&mut s, 1000, |s| s.current_index() == 2), Some(240));
    assert_eq!(
        frames_until(&mut s, 1000, |s| s.status() == PlaybackStatus::Ended),
        Some(330)
    );

    let events = s.drain_events();
    assert_eq!(events.first(), Some(&PlaybackEvent::Started { index: 0 }));
    let ended: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::Ended(meta) => Some(meta),
            _ => None,
        })
        .collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].name, "Summer");
    assert_eq!(ended[0].shareable_link, None);
}

#[test]
fn empty_sequence_stays_idle() {
    let mut s = scheduler(0, 4.0);
    s.start();
    assert_eq!(frames_until(&mut s, 600, |s| s.status() != PlaybackStatus::Idle), None);
    assert!(s.drain_events().is_empty());
}

#[test]
fn single_slide_dwells_with_one_bonus() {
    let mut s = scheduler(1, 2.0);
    s.start();
    assert_eq!(s.dwell_for(0), 3.5);
    assert_eq!(
        frames_until(&mut s, 1000, |s| s.status() == PlaybackStatus::Ended),
        Some(210)
    );
    assert_eq!(s.current_index(), 0);
}

#[test]
fn resume_after_pause_owes_a_full_dwell() {
    let mut s = scheduler(3, 4.0);
    s.start();
    frames_until(&mut s, 120, |_| false);
    s.pause();
    frames_until(&mut s, 600, |_| false);
    assert_eq!(s.current_index(), 0);

    s.start();
    assert_eq!(frames_until(&mut s, 1000, |s| s.current_index() == 1), Some(330));
}

#[test]
fn restart_mid_show_replays_from_the_top() {
    let mut sequence = sequence(4, 2.0);
    sequence.audio_url = Some("music/theme.ogg".into());
    let mut s = PlaybackScheduler::new(&sequence, SimulatedBackend::with_length(120.0), None);
    s.start();
    frames_until(&mut s, 1000, |s| s.current_index() == 2);
    s.drain_events();

    s.restart();
    assert_eq!(s.current_index(), 0);
    assert_eq!(s.audio().handle_state().position_seconds, 0.0);
    let events = s.drain_events();
    assert!(events.contains(&PlaybackEvent::SlideChanged { from: 2, to: 0 }));
    assert!(events.contains(&PlaybackEvent::Started { index: 0 }));

    // Audio comes back after the grace delay and the first dwell is whole again
    frames_until(&mut s, 10, |s| s.audio().status() == AudioStatus::Playing)
        .expect("audio restarts");
    assert_eq!(frames_until(&mut s, 1000, |s| s.current_index() == 1), Some(204));
}

#[test]
fn manual_steps_share_end_detection() {
    let mut s = scheduler(3, 4.0);
    s.start();
    s.next();
    s.next();
    assert_eq!(s.current_index(), 2);
    s.next();
    assert_eq!(s.status(), PlaybackStatus::Ended);
    s.next();
    let ended = s
        .drain_events()
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::Ended(_)))
        .count();
    assert_eq!(ended, 1);

    s.previous();
    assert_eq!(s.current_index(), 1);
    s.toggle();
    assert!(s.is_playing());
    assert_eq!(s.current_index(), 1);
}

fn ended_count(events: &[PlaybackEvent]) -> usize {
    events.iter().filter(|e| matches!(e, PlaybackEvent::Ended(_))).count()
}

#[test]
fn stepping_back_from_the_end_allows_ending_again() {
    let mut s = scheduler(3, 4.0);
    s.start();
    s.update(20.0);
    assert_eq!(s.status(), PlaybackStatus::Ended);
    assert_eq!(ended_count(&s.drain_events()), 1);

    s.previous();
    assert_eq!(s.status(), PlaybackStatus::Paused);
    s.next();
    assert_eq!(s.current_index(), 2);
    assert_eq!(ended_count(&s.drain_events()), 0);

    s.next();
    assert_eq!(s.current_index(), 2);
    assert_eq!(s.status(), PlaybackStatus::Ended);
    assert_eq!(ended_count(&s.drain_events()), 1);
}

#[test]
fn seeking_away_from_the_end_leaves_the_ended_state() {
    let mut s = scheduler(4, 1.0);
    s.start();
    s.update(30.0);
    assert_eq!(s.status(), PlaybackStatus::Ended);
    s.seek(0);
    assert_eq!(s.status(), PlaybackStatus::Paused);
    assert!(!s.has_pending_advance());
    // Seeking onto the slide already shown keeps the end card
    let mut s = scheduler(4, 1.0);
    s.start();
    s.update(30.0);
    s.seek(9);
    assert_eq!(s.status(), PlaybackStatus::Ended);
}

#[test]
fn every_transition_id_resolves() {
    for name in TransitionRegistry::names() {
        assert_eq!(TransitionRegistry::lookup(name).name, name);
    }
    assert_eq!(TransitionRegistry::lookup("nope").name, "fade");
}
