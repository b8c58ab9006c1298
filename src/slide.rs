use std::collections::HashMap;
use std::path::Path;
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::constants::*;
use crate::error::{Result, SlideshowError};
use crate::sequence::is_remote_url;
use crate::texture_loader::load_texture_with_exif_rotation;

/// A decoded slide image, with the scale that fits it on the render surface.
pub struct SlideTexture {
    pub image: Texture2D,
    pub fit_scale: f32,
}

impl SlideTexture {
    pub fn new(image: Texture2D) -> Self {
        let fit_scale = fit_scale(image.width() as f32, image.height() as f32);
        Self { image, fit_scale }
    }

    /// Load the image behind `url`. Remote references are not fetched.
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, url: &str) -> Result<Self> {
        if is_remote_url(url) {
            return Err(SlideshowError::Image(format!("remote image not fetched: {url}")));
        }
        let texture = load_texture_with_exif_rotation(rl, thread, Path::new(url))?;
        Ok(Self::new(texture))
    }
}

/// Largest scale that keeps the image inside `FIT_RATIO` of the surface.
pub fn fit_scale(width: f32, height: f32) -> f32 {
    if width <= 0.0 || height <= 0.0 {
        return 1.0;
    }
    let max_width = RENDER_WIDTH as f32 * FIT_RATIO;
    let max_height = RENDER_HEIGHT as f32 * FIT_RATIO;
    (max_width / width).min(max_height / height)
}

pub enum SlideEntry<T> {
    Ready(T),
    /// Load failed; drawn as a placeholder and never retried
    Broken,
}

/// Per-index slide images. Only a window around the current slide stays
/// resident; broken markers are kept for the whole presentation.
pub struct SlideCache<T> {
    entries: HashMap<usize, SlideEntry<T>>,
}

impl<T> SlideCache<T> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Load slide `index` unless it is already known.
    pub fn ensure<F>(&mut self, index: usize, url: &str, load: F)
    where
        F: FnOnce(&str) -> Result<T>,
    {
        if self.entries.contains_key(&index) {
            return;
        }
        let entry = match load(url) {
            Ok(texture) => {
                debug!("Loaded slide {} from {}", index, url);
                SlideEntry::Ready(texture)
            }
            Err(e) => {
                warn!("Slide {} is broken: {}", index, e);
                SlideEntry::Broken
            }
        };
        self.entries.insert(index, entry);
    }

    pub fn get(&self, index: usize) -> Option<&SlideEntry<T>> {
        self.entries.get(&index)
    }

    pub fn is_broken(&self, index: usize) -> bool {
        matches!(self.entries.get(&index), Some(SlideEntry::Broken))
    }

    /// Drop loaded images further than `window` slides from every anchor.
    /// Anchors are the slides on screen this frame, e.g. both sides of a
    /// transition that wrapped or jumped.
    pub fn retain_window(&mut self, anchors: &[usize], window: usize) {
        self.entries.retain(|index, entry| {
            matches!(entry, SlideEntry::Broken)
                || anchors.iter().any(|anchor| index.abs_diff(*anchor) <= window)
        });
    }
}

impl<T> Default for SlideCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_scale_contains_the_image() {
        let scale = fit_scale(4000.0, 3000.0);
        assert!(4000.0 * scale <= RENDER_WIDTH as f32 * FIT_RATIO + 0.01);
        assert!(3000.0 * scale <= RENDER_HEIGHT as f32 * FIT_RATIO + 0.01);
        // Small images are enlarged to the same bound
        let small = fit_scale(320.0, 240.0);
        assert!((240.0 * small - RENDER_HEIGHT as f32 * FIT_RATIO).abs() < 0.01);
        assert_eq!(fit_scale(0.0, 10.0), 1.0);
    }

    #[test]
    fn failed_load_marks_slide_broken_once() {
        let mut cache: SlideCache<String> = SlideCache::new();
        let mut attempts = 0;
        for _ in 0..3 {
            cache.ensure(1, "missing.jpg", |_| {
                attempts += 1;
                Err(SlideshowError::Image("decode failed".into()))
            });
        }
        assert_eq!(attempts, 1);
        assert!(cache.is_broken(1));
        assert!(!cache.is_broken(0));
    }

    fn loaded(cache: &SlideCache<String>) -> Vec<usize> {
        let mut indices: Vec<_> = cache
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry, SlideEntry::Ready(_)))
            .map(|(index, _)| *index)
            .collect();
        indices.sort();
        indices
    }

    #[test]
    fn window_evicts_far_slides_but_remembers_broken_ones() {
        let mut cache: SlideCache<String> = SlideCache::new();
        for index in 0..6 {
            cache.ensure(index, &format!("{index}.jpg"), |url| Ok(url.to_string()));
        }
        cache.ensure(9, "9.jpg", |_| Err(SlideshowError::Image("bad".into())));
        cache.retain_window(&[4], 1);
        assert_eq!(loaded(&cache), [3, 4, 5]);
        assert!(matches!(cache.get(5), Some(SlideEntry::Ready(url)) if url == "5.jpg"));
        assert!(cache.get(0).is_none());
        assert!(cache.is_broken(9));
    }

    #[test]
    fn wrapping_transition_keeps_outgoing_slide() {
        let mut cache: SlideCache<String> = SlideCache::new();
        let mut loads = 0;
        // Previous on slide 0 of 6 wraps to slide 5 while slide 0 exits
        for _ in 0..3 {
            for index in [5, 0] {
                cache.ensure(index, &format!("{index}.jpg"), |url| {
                    loads += 1;
                    Ok(url.to_string())
                });
            }
            cache.retain_window(&[5, 0], 2);
        }
        assert_eq!(loads, 2);
        assert!(matches!(cache.get(0), Some(SlideEntry::Ready(_))));

        // Once the transition settles only the current slide anchors the window
        cache.retain_window(&[5], 2);
        assert_eq!(loaded(&cache), [5]);
    }
}
