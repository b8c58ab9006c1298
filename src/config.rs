//! Presentation configuration, resolved from the command line.

/// How the sequence reached the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    /// Author previewing a draft; nothing is recorded
    Preview,
    /// Viewer opening a shared sequence; the first start counts a view
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Fullscreen,
    Embedded,
}

#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub mode: PresentationMode,
    pub display: DisplayMode,
    /// Base of shareable links, e.g. `https://slides.example.com`
    pub share_base_url: Option<String>,
    /// Play without opening an audio device
    pub mute: bool,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            mode: PresentationMode::Preview,
            display: DisplayMode::Fullscreen,
            share_base_url: None,
            mute: false,
        }
    }
}
