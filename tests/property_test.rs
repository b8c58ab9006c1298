//! Property-based tests for the playback scheduler and transition registry.

use proptest::prelude::*;
use slideshow_player::{
    PlaybackEvent, PlaybackScheduler, PlaybackStatus, SimulatedBackend, SlideSequence,
    TransitionRegistry,
};

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Toggle,
    Next,
    Previous,
    Seek(usize),
    Restart,
    Update(f64),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::Pause),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..10).prop_map(Op::Seek),
        Just(Op::Restart),
        (0.0f64..8.0).prop_map(Op::Update),
    ]
}

fn scheduler(len: usize, duration: f64) -> PlaybackScheduler<SimulatedBackend> {
    let mut sequence = SlideSequence::draft();
    sequence.slide_urls = (0..len).map(|i| format!("{i}.png")).collect();
    sequence.slide_duration_seconds = duration;
    sequence.audio_url = Some("track.ogg".into());
    PlaybackScheduler::new(&sequence, SimulatedBackend::with_length(30.0), None)
}

fn apply(s: &mut PlaybackScheduler<SimulatedBackend>, op: &Op) {
    match op {
        Op::Start => s.start(),
        Op::Pause => s.pause(),
        Op::Toggle => s.toggle(),
        Op::Next => s.next(),
        Op::Previous => s.previous(),
        Op::Seek(index) => s.seek(*index),
        Op::Restart => s.restart(),
        Op::Update(dt) => s.update(*dt),
    }
}

proptest! {
    /// Property: the index stays in range and a timer is armed exactly while playing
    #[test]
    fn index_in_range_and_single_timer(
        len in 0usize..6,
        duration in 0.5f64..6.0,
        ops in prop::collection::vec(arbitrary_op(), 1..60)
    ) {
        let mut s = scheduler(len, duration);
        for op in &ops {
            apply(&mut s, op);
            if len == 0 {
                prop_assert_eq!(s.current_index(), 0);
                prop_assert_eq!(s.status(), PlaybackStatus::Idle);
            } else {
                prop_assert!(s.current_index() < len);
            }
            prop_assert_eq!(s.has_pending_advance(), s.status() == PlaybackStatus::Playing);
        }
    }

    /// Property: the show ends at most once until playback starts again or the slide changes
    #[test]
    fn ended_at_most_once_per_cycle(
        len in 1usize..5,
        ops in prop::collection::vec(arbitrary_op(), 1..80)
    ) {
        let mut s = scheduler(len, 1.0);
        let mut events = Vec::new();
        for op in &ops {
            apply(&mut s, op);
            events.extend(s.drain_events());
        }

        let mut ended_in_cycle = 0;
        for event in &events {
            match event {
                PlaybackEvent::Started { .. } | PlaybackEvent::SlideChanged { .. } => {
                    ended_in_cycle = 0
                }
                PlaybackEvent::Ended(_) => {
                    ended_in_cycle += 1;
                    prop_assert!(ended_in_cycle <= 1, "ended twice in one cycle: {:?}", events);
                }
                _ => {}
            }
        }
    }

    /// Property: slide changes always report the index the scheduler moved to
    #[test]
    fn slide_changes_are_contiguous(
        len in 1usize..6,
        ops in prop::collection::vec(arbitrary_op(), 1..60)
    ) {
        let mut s = scheduler(len, 2.0);
        let mut shown = 0;
        for op in &ops {
            apply(&mut s, op);
            for event in s.drain_events() {
                if let PlaybackEvent::SlideChanged { from, to } = event {
                    prop_assert_eq!(from, shown);
                    prop_assert_ne!(from, to);
                    shown = to;
                }
            }
            prop_assert_eq!(shown, s.current_index());
        }
    }

    /// Property: transition lookup is total
    #[test]
    fn lookup_never_fails(id in ".{0,24}") {
        let descriptor = TransitionRegistry::lookup(id.as_str());
        prop_assert!(TransitionRegistry::all().iter().any(|d| d.name == descriptor.name));
        prop_assert!(descriptor.total_ms() > 0);
    }

    /// Property: edge slides dwell longer, interior slides dwell the baseline
    #[test]
    fn dwell_matches_position(len in 1usize..20, duration in 0.1f64..30.0) {
        let s = scheduler(len, duration);
        for index in 0..len {
            let expected = if index == 0 || index + 1 == len { duration + 1.5 } else { duration };
            prop_assert!((s.dwell_for(index) - expected).abs() < 1e-12);
        }
    }
}
