//! Easing curves, evaluated with raylib's `ease` functions.

use raylib::prelude::*;

/// Rate-of-change family of an animated property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Smooth,
    Bounce,
    Elastic,
    Power,
    Expo,
    Circ,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseMode {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Easing {
    pub curve: Curve,
    pub mode: EaseMode,
}

impl Easing {
    pub const fn new(curve: Curve, mode: EaseMode) -> Self {
        Self { curve, mode }
    }

    pub const fn smooth() -> Self {
        Self::new(Curve::Smooth, EaseMode::InOut)
    }

    fn function(&self) -> fn(f32, f32, f32, f32) -> f32 {
        use Curve::*;
        use EaseMode::*;
        match (self.curve, self.mode) {
            (Smooth, In) => ease::sine_in,
            (Smooth, Out) => ease::sine_out,
            (Smooth, InOut) => ease::sine_in_out,
            (Bounce, In) => ease::bounce_in,
            (Bounce, Out) => ease::bounce_out,
            (Bounce, InOut) => ease::bounce_in_out,
            (Elastic, In) => ease::elastic_in,
            (Elastic, Out) => ease::elastic_out,
            (Elastic, InOut) => ease::elastic_in_out,
            (Power, In) => ease::cubic_in,
            (Power, Out) => ease::cubic_out,
            (Power, InOut) => ease::cubic_in_out,
            (Expo, In) => ease::expo_in,
            (Expo, Out) => ease::expo_out,
            (Expo, InOut) => ease::expo_in_out,
            (Circ, In) => ease::circ_in,
            (Circ, Out) => ease::circ_out,
            (Circ, InOut) => ease::circ_in_out,
            (Back, In) => ease::back_in,
            (Back, Out) => ease::back_out,
            (Back, InOut) => ease::back_in_out,
        }
    }

    /// Eased value between `from` and `to` at `progress` in `[0, 1]`.
    ///
    /// Both ends are exact; back and elastic curves may overshoot in between.
    pub fn interpolate(&self, from: f32, to: f32, progress: f32) -> f32 {
        if progress <= 0.0 {
            return from;
        }
        if progress >= 1.0 {
            return to;
        }
        (self.function())(progress, from, to - from, 1.0)
    }
}
