//! Slide sequences: the records the player is handed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{DEFAULT_SLIDE_DURATION, DRAFT_ID, EDGE_SLIDE_BONUS};
use crate::error::Result;
use crate::texture_loader::load_sorted_image_paths;

/// Ordered images plus timing, transition and audio metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideSequence {
    #[serde(default = "draft_id")]
    pub id: String,
    #[serde(default)]
    pub slide_urls: Vec<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default = "default_duration")]
    pub slide_duration_seconds: f64,
    #[serde(default)]
    pub transition_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub loop_audio_independently: bool,
}

fn draft_id() -> String {
    DRAFT_ID.to_string()
}

fn default_duration() -> f64 {
    DEFAULT_SLIDE_DURATION
}

/// Payload of the "ended" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndedMetadata {
    pub name: String,
    pub message: Option<String>,
    pub shareable_link: Option<String>,
}

impl SlideSequence {
    /// Empty unsaved draft.
    pub fn draft() -> Self {
        Self {
            id: draft_id(),
            slide_urls: Vec::new(),
            audio_url: None,
            slide_duration_seconds: DEFAULT_SLIDE_DURATION,
            transition_id: None,
            title: None,
            message: None,
            loop_audio_independently: false,
        }
    }

    /// Draft holding every image of `dir`, sorted by file name.
    pub fn from_image_directory(dir: &Path) -> Result<Self> {
        let paths = load_sorted_image_paths(dir)?;
        let mut sequence = Self::draft();
        sequence.title = dir.file_name().map(|name| name.to_string_lossy().into_owned());
        sequence.slide_urls = paths
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect();
        Ok(sequence)
    }

    /// Draft stored as a JSON document.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let mut sequence: Self = serde_json::from_slice(&bytes)?;
        if let Some(base) = path.parent() {
            sequence.resolve_relative_urls(base);
        }
        Ok(sequence)
    }

    pub fn len(&self) -> usize {
        self.slide_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slide_urls.is_empty()
    }

    pub fn is_draft(&self) -> bool {
        self.id == DRAFT_ID
    }

    /// Baseline dwell, with unusable values replaced by the default.
    pub fn effective_duration(&self) -> f64 {
        let duration = self.slide_duration_seconds;
        if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            warn!(
                "Sequence {} has unusable slide duration {}, using {}s",
                self.id, duration, DEFAULT_SLIDE_DURATION
            );
            DEFAULT_SLIDE_DURATION
        }
    }

    pub fn ended_metadata(&self, share_base_url: Option<&str>) -> EndedMetadata {
        let shareable_link = match share_base_url {
            Some(base) if !self.is_draft() => {
                Some(format!("{}/view/{}", base.trim_end_matches('/'), self.id))
            }
            _ => None,
        };
        EndedMetadata {
            name: self
                .title
                .clone()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| "Untitled slideshow".to_string()),
            message: self.message.clone(),
            shareable_link,
        }
    }

    /// Rewrite relative media references against `base`.
    pub fn resolve_relative_urls(&mut self, base: &Path) {
        for url in self.slide_urls.iter_mut() {
            *url = resolve_media_url(base, url);
        }
        if let Some(audio) = self.audio_url.as_mut() {
            *audio = resolve_media_url(base, audio);
        }
    }
}

/// First and last slide get the edge bonus; interior slides dwell `base`.
pub fn dwell_for(index: usize, len: usize, base: f64) -> f64 {
    if len == 0 {
        return base;
    }
    if index == 0 || index + 1 == len {
        base + EDGE_SLIDE_BONUS
    } else {
        base
    }
}

pub fn is_remote_url(url: &str) -> bool {
    url.contains("://")
}

/// Absolute paths and URLs pass through; anything else is relative to `base`.
pub fn resolve_media_url(base: &Path, url: &str) -> String {
    if url.is_empty() || is_remote_url(url) || Path::new(url).is_absolute() {
        url.to_string()
    } else {
        base.join(url).to_string_lossy().into_owned()
    }
}
