//! Presentation shell: mounts a sequence, forwards input to the scheduler
//! and the idle tracker, and keeps the render state the window draws.

use tracing::{debug, info, warn};

use crate::audio::AudioBackend;
use crate::config::{PresentationMode, ShowConfig};
use crate::constants::RANDOM_TRANSITION_ID;
use crate::events::PlaybackEvent;
use crate::idle::IdleActivityTracker;
use crate::scheduler::PlaybackScheduler;
use crate::sequence::{EndedMetadata, SlideSequence};
use crate::state::PlaybackStatus;
use crate::store::SequenceStore;
use crate::transition::{TransitionDescriptor, TransitionRegistry};

pub enum SequenceSource {
    /// In-memory sequence that was never saved
    Draft(SlideSequence),
    /// Sequence fetched by id from the store
    Stored { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellInput {
    TogglePlay,
    Next,
    Previous,
    Restart,
    Seek(usize),
    PointerMoved,
    PointerLeft,
    Close,
}

/// Slide change currently animating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveTransition {
    pub outgoing: Option<usize>,
    pub incoming: usize,
    pub descriptor: &'static TransitionDescriptor,
    pub elapsed_ms: f32,
}

impl ActiveTransition {
    pub fn is_settled(&self) -> bool {
        self.elapsed_ms >= self.descriptor.total_ms() as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// `None` when there is nothing to show
    pub current_index: Option<usize>,
    pub slide_count: usize,
    pub controls_visible: bool,
    pub status: Option<PlaybackStatus>,
    pub transition: Option<ActiveTransition>,
    /// Slide to load ahead of time
    pub preload_index: Option<usize>,
}

type EndedHandler = Box<dyn FnMut(&EndedMetadata)>;

pub struct PresentationShell<B: AudioBackend> {
    config: ShowConfig,
    store: Box<dyn SequenceStore>,
    sequence: Option<SlideSequence>,
    scheduler: Option<PlaybackScheduler<B>>,
    /// Id that failed to load; terminal for this mount
    not_found: Option<String>,
    idle: IdleActivityTracker,
    transition: Option<ActiveTransition>,
    view_recorded: bool,
    ended: Option<EndedMetadata>,
    on_ended: Option<EndedHandler>,
    closed: bool,
}

impl<B: AudioBackend> PresentationShell<B> {
    /// Resolve the sequence and start playing it.
    pub fn mount(
        source: SequenceSource,
        backend: B,
        store: Box<dyn SequenceStore>,
        config: ShowConfig,
    ) -> Self {
        let sequence = match source {
            SequenceSource::Draft(sequence) => Ok(sequence),
            SequenceSource::Stored { id } => store.fetch(&id).map_err(|e| {
                warn!("Could not load sequence {}: {}", id, e);
                id
            }),
        };

        let mut shell = Self {
            config,
            store,
            sequence: None,
            scheduler: None,
            not_found: None,
            idle: IdleActivityTracker::new(),
            transition: None,
            view_recorded: false,
            ended: None,
            on_ended: None,
            closed: false,
        };

        match sequence {
            Ok(sequence) => {
                info!(
                    "Presenting {} ({} slides, transition {:?})",
                    sequence.id,
                    sequence.len(),
                    sequence.transition_id
                );
                let scheduler = PlaybackScheduler::new(
                    &sequence,
                    backend,
                    shell.config.share_base_url.as_deref(),
                );
                if !sequence.is_empty() {
                    shell.transition = Some(ActiveTransition {
                        outgoing: None,
                        incoming: 0,
                        descriptor: resolve_descriptor(&sequence),
                        elapsed_ms: 0.0,
                    });
                }
                shell.sequence = Some(sequence);
                shell.scheduler = Some(scheduler);
                if let Some(scheduler) = shell.scheduler.as_mut() {
                    scheduler.start();
                }
                shell.process_events();
            }
            Err(id) => shell.not_found = Some(id),
        }
        shell
    }

    /// Forward the end-of-show event to `handler`.
    pub fn with_ended_handler(mut self, handler: impl FnMut(&EndedMetadata) + 'static) -> Self {
        self.on_ended = Some(Box::new(handler));
        self
    }

    pub fn sequence(&self) -> Option<&SlideSequence> {
        self.sequence.as_ref()
    }

    pub fn scheduler(&self) -> Option<&PlaybackScheduler<B>> {
        self.scheduler.as_ref()
    }

    pub fn not_found(&self) -> Option<&str> {
        self.not_found.as_deref()
    }

    /// Metadata of the end card, while it is showing.
    pub fn ended(&self) -> Option<&EndedMetadata> {
        self.ended.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    pub fn handle(&mut self, input: ShellInput) {
        match input {
            ShellInput::PointerMoved => self.idle.pointer_activity(),
            ShellInput::PointerLeft => self.idle.pointer_left(),
            ShellInput::Close => self.close(),
            command => {
                let Some(scheduler) = self.scheduler.as_mut() else {
                    return;
                };
                match command {
                    ShellInput::TogglePlay => scheduler.toggle(),
                    ShellInput::Next => scheduler.next(),
                    ShellInput::Previous => scheduler.previous(),
                    ShellInput::Restart => scheduler.restart(),
                    ShellInput::Seek(index) => scheduler.seek(index),
                    _ => {}
                }
            }
        }
        self.process_events();
    }

    /// Advance timers and animations by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.idle.update(dt as f64);
        if let Some(transition) = self.transition.as_mut() {
            transition.elapsed_ms += dt * 1000.0;
            if transition.is_settled() {
                self.transition = None;
            }
        }
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.update(dt as f64);
        }
        self.process_events();
    }

    pub fn render_state(&self) -> RenderState {
        let slide_count = self.scheduler.as_ref().map(|s| s.slide_count()).unwrap_or(0);
        let current_index = self
            .scheduler
            .as_ref()
            .filter(|s| s.slide_count() > 0)
            .map(|s| s.current_index());
        RenderState {
            current_index,
            slide_count,
            controls_visible: self.idle.controls_visible(),
            status: self.scheduler.as_ref().map(|s| s.status()),
            transition: self.transition,
            preload_index: current_index
                .map(|index| index + 1)
                .filter(|next| *next < slide_count),
        }
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.teardown();
        }
        self.closed = true;
        info!("Presentation closed");
    }

    fn process_events(&mut self) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        for event in scheduler.drain_events() {
            match event {
                PlaybackEvent::Started { .. } => {
                    self.ended = None;
                    self.record_view_once();
                }
                PlaybackEvent::Paused { .. } => {}
                PlaybackEvent::SlideChanged { from, to } => {
                    self.ended = None;
                    if let Some(sequence) = self.sequence.as_ref() {
                        self.transition = Some(ActiveTransition {
                            outgoing: Some(from),
                            incoming: to,
                            descriptor: resolve_descriptor(sequence),
                            elapsed_ms: 0.0,
                        });
                    }
                }
                PlaybackEvent::Ended(metadata) => {
                    if let Some(handler) = self.on_ended.as_mut() {
                        handler(&metadata);
                    }
                    self.ended = Some(metadata);
                }
            }
        }
    }

    fn record_view_once(&mut self) {
        if self.view_recorded || self.config.mode != PresentationMode::View {
            return;
        }
        self.view_recorded = true;
        let Some(sequence) = self.sequence.as_ref() else {
            return;
        };
        if let Err(e) = self.store.record_view(&sequence.id) {
            debug!("View of {} not recorded: {}", sequence.id, e);
        }
    }
}

/// Descriptor for the next slide change of `sequence`.
fn resolve_descriptor(sequence: &SlideSequence) -> &'static TransitionDescriptor {
    match sequence.transition_id.as_deref() {
        Some(id) if id.trim().eq_ignore_ascii_case(RANDOM_TRANSITION_ID) => {
            TransitionRegistry::random(&mut rand::rng())
        }
        id => TransitionRegistry::lookup(id),
    }
}
