//! Slide playback engine: timed advance through an image sequence, named
//! transitions, a background track kept in step with playback and
//! auto-hiding controls. The window itself lives in the binary.

pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod idle;
pub mod presentation;
pub mod render;
pub mod scheduler;
pub mod sequence;
pub mod slide;
pub mod state;
pub mod store;
pub mod texture_loader;
pub mod timer;
pub mod transition;

pub use audio::{AudioBackend, AudioSynchronizer, MusicBackend, SimulatedBackend};
pub use config::{DisplayMode, PresentationMode, ShowConfig};
pub use error::{Result, SlideshowError};
pub use events::PlaybackEvent;
pub use idle::IdleActivityTracker;
pub use presentation::{PresentationShell, RenderState, SequenceSource, ShellInput};
pub use scheduler::PlaybackScheduler;
pub use sequence::{EndedMetadata, SlideSequence};
pub use state::PlaybackStatus;
pub use store::{JsonSequenceStore, SequenceStore};
pub use transition::TransitionRegistry;
