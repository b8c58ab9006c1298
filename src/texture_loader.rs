use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, warn};

use crate::error::{Result, SlideshowError};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(SlideshowError::InvalidSequence(format!(
            "No image files found in directory: {}",
            dir_path.display()
        )))
    } else {
        Ok(paths)
    }
}

// --- EXIF orientation (only read reliably for JPEG) ---
pub fn read_exif_orientation(file_bytes: &[u8], extension: &str) -> u16 {
    if extension != "jpg" && extension != "jpeg" {
        return 1;
    }
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Non-critical: proceed without rotation
            debug!("Could not read EXIF data: {}", e);
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = read_exif_orientation(&file_bytes, &extension);

    // Provide extension hint for loading from memory
    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| SlideshowError::Image(format!("{}: {}", image_path.display(), e)))?;

    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored here.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        1 => {}
        other => warn!("Ignoring EXIF orientation {} for {}", other, image_path.display()),
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| SlideshowError::Image(format!("{}: {}", image_path.display(), e)))?;

    // Unload the Image data from CPU memory
    drop(image);

    Ok(texture)
}
