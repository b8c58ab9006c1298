//! Events emitted by the scheduler, drained by the presentation shell.

use crate::sequence::EndedMetadata;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Playback (re)started on `index`
    Started { index: usize },

    /// Playback paused on `index`
    Paused { index: usize },

    /// Visible slide changed
    SlideChanged { from: usize, to: usize },

    /// A full forward cycle completed; playback stopped on the last slide
    Ended(EndedMetadata),
}
