use crate::transition::easing::Easing;

/// Visual property driven by a transition curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Horizontal offset, as a fraction of the render width
    OffsetX,
    /// Vertical offset, as a fraction of the render height
    OffsetY,
    Scale,
    /// Degrees, clockwise
    Rotation,
    Opacity,
    /// Pixels
    Blur,
    Brightness,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyCurve {
    pub property: Property,
    pub from: f32,
    pub to: f32,
}

/// One half of a transition: how a slide appears or disappears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub curves: &'static [PropertyCurve],
    pub duration_ms: u32,
    /// Time the phase holds its starting values before animating
    pub delay_ms: u32,
    pub easing: Easing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionDescriptor {
    pub name: &'static str,
    pub entrance: Phase,
    pub exit: Phase,
}

/// Resolved visual state of a slide at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualProps {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub rotation: f32,
    pub opacity: f32,
    pub blur: f32,
    pub brightness: f32,
}

impl Default for VisualProps {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            blur: 0.0,
            brightness: 1.0,
        }
    }
}

impl VisualProps {
    fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::OffsetX => self.offset_x = value,
            Property::OffsetY => self.offset_y = value,
            Property::Scale => self.scale = value,
            Property::Rotation => self.rotation = value,
            Property::Opacity => self.opacity = value.clamp(0.0, 1.0),
            Property::Blur => self.blur = value.max(0.0),
            Property::Brightness => self.brightness = value.max(0.0),
        }
    }
}

impl Phase {
    pub fn total_ms(&self) -> u32 {
        self.delay_ms + self.duration_ms
    }

    /// Progress in `[0, 1]` after `elapsed_ms` of this phase.
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        let active = elapsed_ms - self.delay_ms as f32;
        if active <= 0.0 {
            0.0
        } else if self.duration_ms == 0 {
            1.0
        } else {
            (active / self.duration_ms as f32).min(1.0)
        }
    }

    pub fn sample(&self, elapsed_ms: f32) -> VisualProps {
        let progress = self.progress(elapsed_ms);
        let mut props = VisualProps::default();
        for c in self.curves {
            props.set(c.property, self.easing.interpolate(c.from, c.to, progress));
        }
        props
    }
}

impl TransitionDescriptor {
    /// Time until both phases have settled.
    pub fn total_ms(&self) -> u32 {
        self.entrance.total_ms().max(self.exit.total_ms())
    }
}
