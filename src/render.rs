use raylib::prelude::*;

use crate::constants::*;
use crate::presentation::RenderState;
use crate::sequence::EndedMetadata;
use crate::slide::{SlideCache, SlideEntry, SlideTexture};
use crate::state::PlaybackStatus;
use crate::transition::VisualProps;

const PLACEHOLDER_WIDTH: f32 = 960.0;
const PLACEHOLDER_HEIGHT: f32 = 540.0;

/// Text layered over the slides.
pub struct Overlay<'a> {
    pub title: Option<&'a str>,
    pub ended: Option<&'a EndedMetadata>,
}

// --- Slides, in transition order: outgoing below incoming ---
pub fn draw_slides(d: &mut RaylibDrawHandle, frame: &RenderState, cache: &SlideCache<SlideTexture>) {
    let Some(current) = frame.current_index else {
        return;
    };
    match frame.transition {
        Some(transition) => {
            if let Some(outgoing) = transition.outgoing {
                let props = transition.descriptor.exit.sample(transition.elapsed_ms);
                draw_slide(d, cache.get(outgoing), props);
            }
            let props = transition.descriptor.entrance.sample(transition.elapsed_ms);
            draw_slide(d, cache.get(transition.incoming), props);
        }
        None => draw_slide(d, cache.get(current), VisualProps::default()),
    }
}

fn draw_slide(d: &mut RaylibDrawHandle, entry: Option<&SlideEntry<SlideTexture>>, props: VisualProps) {
    let screen_width = RENDER_WIDTH as f32;
    let screen_height = RENDER_HEIGHT as f32;
    let center = Vector2::new(
        screen_width * (0.5 + props.offset_x),
        screen_height * (0.5 + props.offset_y),
    );

    match entry {
        Some(SlideEntry::Ready(slide)) => {
            let tex_width = slide.image.width() as f32;
            let tex_height = slide.image.height() as f32;

            let scale = slide.fit_scale * props.scale;
            let scaled_width = tex_width * scale;
            let scaled_height = tex_height * scale;

            // Relative to the dest rectangle (ie. the center of the image)
            let origin = Vector2::new(scaled_width * 0.5, scaled_height * 0.5);
            let dest = Rectangle::new(center.x, center.y, scaled_width, scaled_height);

            d.draw_texture_pro(
                &slide.image,
                Rectangle::new(0.0, 0.0, tex_width, tex_height),
                dest,
                origin,
                props.rotation,
                tint(props),
            );
            draw_brightening(d, dest, origin, props);
        }
        Some(SlideEntry::Broken) => {
            let width = PLACEHOLDER_WIDTH * props.scale;
            let height = PLACEHOLDER_HEIGHT * props.scale;
            let origin = Vector2::new(width * 0.5, height * 0.5);
            let alpha = (props.opacity * 255.0) as u8;
            d.draw_rectangle_pro(
                Rectangle::new(center.x, center.y, width, height),
                origin,
                props.rotation,
                Color::new(40, 40, 40, alpha),
            );
            d.draw_text(
                "Image unavailable",
                (center.x - 110.0) as i32,
                (center.y - 15.0) as i32,
                30,
                Color::new(200, 200, 200, alpha),
            );
        }
        // Not loaded yet; the frame stays black rather than stalling
        None => {}
    }
}

/// Multiplicative tint for opacity and darkening. Blur has no shader here,
/// so it fades the slide proportionally instead.
fn tint(props: VisualProps) -> Color {
    let level = (props.brightness.min(1.0) * 255.0) as u8;
    let softened = props.opacity / (1.0 + props.blur / 10.0);
    Color::new(level, level, level, (softened.clamp(0.0, 1.0) * 255.0) as u8)
}

// Brightness above 1 is a white wash over the slide bounds
fn draw_brightening(d: &mut RaylibDrawHandle, dest: Rectangle, origin: Vector2, props: VisualProps) {
    if props.brightness <= 1.0 {
        return;
    }
    let wash = ((props.brightness - 1.0) * 0.5).min(1.0) * props.opacity;
    d.draw_rectangle_pro(dest, origin, props.rotation, Color::new(255, 255, 255, (wash * 255.0) as u8));
}

pub fn draw_overlay(d: &mut RaylibDrawHandle, frame: &RenderState, overlay: &Overlay) {
    if let Some(ended) = overlay.ended {
        draw_end_card(d, ended);
    }
    if frame.controls_visible {
        draw_controls(d, frame, overlay.title);
    }
}

fn draw_controls(d: &mut RaylibDrawHandle, frame: &RenderState, title: Option<&str>) {
    let bar_height = 70;
    let top = RENDER_HEIGHT - bar_height;
    d.draw_rectangle(0, top, RENDER_WIDTH, bar_height, Color::new(0, 0, 0, 160));

    if let Some(title) = title {
        d.draw_text(title, 30, 30, 40, Color::WHITE);
    }

    let position = match frame.current_index {
        Some(index) => format!("{} / {}", index + 1, frame.slide_count),
        None => "No slides".to_string(),
    };
    let status = match frame.status {
        Some(PlaybackStatus::Playing) => "Playing",
        Some(PlaybackStatus::Paused) => "Paused",
        Some(PlaybackStatus::Ended) => "Ended",
        Some(PlaybackStatus::Idle) | None => "Stopped",
    };
    d.draw_text(&position, 30, top + 20, 30, Color::WHITE);
    d.draw_text(status, 220, top + 20, 30, Color::LIGHTGRAY);
    d.draw_text(
        "[Space] play/pause   [Left/Right] step   [R] restart   [Esc] close",
        RENDER_WIDTH - 1010,
        top + 22,
        26,
        Color::LIGHTGRAY,
    );

    // Progress dots
    if frame.slide_count > 1 && frame.slide_count <= 60 {
        let spacing = 18;
        let width = spacing * frame.slide_count as i32;
        let left = (RENDER_WIDTH - width) / 2;
        for i in 0..frame.slide_count {
            let color = if Some(i) == frame.current_index { Color::WHITE } else { Color::GRAY };
            d.draw_circle(left + spacing * i as i32 + spacing / 2, top - 20, 5.0, color);
        }
    }
}

fn draw_end_card(d: &mut RaylibDrawHandle, ended: &EndedMetadata) {
    d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, Color::new(0, 0, 0, 190));
    let left = 160;
    let mut y = RENDER_HEIGHT / 3;
    d.draw_text(&ended.name, left, y, 80, Color::WHITE);
    y += 120;
    if let Some(message) = ended.message.as_deref() {
        for line in message.lines() {
            d.draw_text(line, left, y, 40, Color::LIGHTGRAY);
            y += 55;
        }
        y += 30;
    }
    if let Some(link) = ended.shareable_link.as_deref() {
        d.draw_text(&format!("Share: {link}"), left, y, 34, Color::SKYBLUE);
        y += 60;
    }
    d.draw_text("[Space] watch again   [Esc] close", left, y, 30, Color::GRAY);
}

pub fn draw_not_found(d: &mut RaylibDrawHandle, id: &str) {
    d.clear_background(Color::BLACK);
    d.draw_text("Slideshow not found", 160, RENDER_HEIGHT / 3, 80, Color::WHITE);
    d.draw_text(
        &format!("No slideshow is stored under \"{id}\"."),
        160,
        RENDER_HEIGHT / 3 + 120,
        40,
        Color::LIGHTGRAY,
    );
}
