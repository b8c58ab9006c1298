//! Persistence collaborator: fetch sequences by id, count views.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, SlideshowError};
use crate::sequence::SlideSequence;

pub trait SequenceStore {
    fn fetch(&self, id: &str) -> Result<SlideSequence>;

    /// Fire-and-forget view counter; callers ignore failures.
    fn record_view(&self, id: &str) -> Result<()>;
}

/// Sequences stored as `<root>/<id>.json`, view counts as `<root>/<id>.views`.
#[derive(Debug, Clone)]
pub struct JsonSequenceStore {
    root: PathBuf,
}

impl JsonSequenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, id: &str, extension: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SlideshowError::SequenceNotFound(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.{extension}")))
    }

    pub fn view_count(&self, id: &str) -> Result<u64> {
        let path = self.record_path(id, "views")?;
        match fs::read_to_string(&path) {
            Ok(text) => text
                .trim()
                .parse()
                .map_err(|_| SlideshowError::InvalidSequence(format!("corrupt view counter {}", path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

impl SequenceStore for JsonSequenceStore {
    fn fetch(&self, id: &str) -> Result<SlideSequence> {
        let path = self.record_path(id, "json")?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SlideshowError::SequenceNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut sequence: SlideSequence = serde_json::from_slice(&bytes)?;
        sequence.id = id.to_string();
        sequence.resolve_relative_urls(&self.root);
        debug!("Fetched sequence {} ({} slides)", id, sequence.len());
        Ok(sequence)
    }

    fn record_view(&self, id: &str) -> Result<()> {
        let count = self.view_count(id)?;
        let path = self.record_path(id, "views")?;
        fs::write(path, (count + 1).to_string())?;
        Ok(())
    }
}
