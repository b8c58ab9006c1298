//! Error types for the slideshow player

use thiserror::Error;

/// Slideshow errors
#[derive(Debug, Error)]
pub enum SlideshowError {
    /// No sequence exists under the requested id
    #[error("Sequence not found: {0}")]
    SequenceNotFound(String),

    /// Sequence record could not be interpreted
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    /// Image could not be read or decoded
    #[error("Image error: {0}")]
    Image(String),

    /// Audio device or stream error
    #[error("Audio error: {0}")]
    Audio(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for slideshow operations
pub type Result<T> = std::result::Result<T, SlideshowError>;
