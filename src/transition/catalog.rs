//! Built-in transition descriptors.
//!
//! Offsets are fractions of the render surface, rotations are degrees.
//! Delays on an entrance let the outgoing slide clear first.

use crate::transition::descriptor::{Phase, Property::*, PropertyCurve, TransitionDescriptor};
use crate::transition::easing::{Curve, EaseMode, Easing};

macro_rules! curve {
    ($property:ident, $from:expr, $to:expr) => {
        PropertyCurve { property: $property, from: $from, to: $to }
    };
}

const fn phase(curves: &'static [PropertyCurve], duration_ms: u32, delay_ms: u32, easing: Easing) -> Phase {
    Phase { curves, duration_ms, delay_ms, easing }
}

const fn ease(curve: Curve, mode: EaseMode) -> Easing {
    Easing::new(curve, mode)
}

const FADE_IN: &[PropertyCurve] = &[curve!(Opacity, 0.0, 1.0)];
const FADE_OUT: &[PropertyCurve] = &[curve!(Opacity, 1.0, 0.0)];

pub const FADE: TransitionDescriptor = TransitionDescriptor {
    name: "fade",
    entrance: phase(FADE_IN, 600, 0, ease(Curve::Smooth, EaseMode::InOut)),
    exit: phase(FADE_OUT, 600, 0, ease(Curve::Smooth, EaseMode::InOut)),
};

pub const CATALOG: &[TransitionDescriptor] = &[
    FADE,
    TransitionDescriptor {
        name: "crossfade",
        entrance: phase(FADE_IN, 1000, 0, ease(Curve::Smooth, EaseMode::InOut)),
        exit: phase(
            &[curve!(Opacity, 1.0, 0.0), curve!(Brightness, 1.0, 0.8)],
            1000,
            0,
            ease(Curve::Smooth, EaseMode::InOut),
        ),
    },
    TransitionDescriptor {
        name: "slide-left",
        entrance: phase(&[curve!(OffsetX, 1.0, 0.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
        exit: phase(&[curve!(OffsetX, 0.0, -1.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
    },
    TransitionDescriptor {
        name: "slide-right",
        entrance: phase(&[curve!(OffsetX, -1.0, 0.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
        exit: phase(&[curve!(OffsetX, 0.0, 1.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
    },
    TransitionDescriptor {
        name: "slide-up",
        entrance: phase(&[curve!(OffsetY, 1.0, 0.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
        exit: phase(&[curve!(OffsetY, 0.0, -1.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
    },
    TransitionDescriptor {
        name: "slide-down",
        entrance: phase(&[curve!(OffsetY, -1.0, 0.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
        exit: phase(&[curve!(OffsetY, 0.0, 1.0)], 700, 0, ease(Curve::Power, EaseMode::Out)),
    },
    TransitionDescriptor {
        name: "zoom-in",
        entrance: phase(
            &[curve!(Scale, 0.5, 1.0), curve!(Opacity, 0.0, 1.0)],
            800,
            0,
            ease(Curve::Expo, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Scale, 1.0, 1.5), curve!(Opacity, 1.0, 0.0)],
            800,
            0,
            ease(Curve::Expo, EaseMode::Out),
        ),
    },
    TransitionDescriptor {
        name: "zoom-out",
        entrance: phase(
            &[curve!(Scale, 1.5, 1.0), curve!(Opacity, 0.0, 1.0)],
            800,
            0,
            ease(Curve::Expo, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Scale, 1.0, 0.5), curve!(Opacity, 1.0, 0.0)],
            800,
            0,
            ease(Curve::Expo, EaseMode::Out),
        ),
    },
    TransitionDescriptor {
        name: "rotate",
        entrance: phase(
            &[curve!(Rotation, -90.0, 0.0), curve!(Opacity, 0.0, 1.0)],
            800,
            0,
            ease(Curve::Back, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Rotation, 0.0, 90.0), curve!(Opacity, 1.0, 0.0)],
            800,
            0,
            ease(Curve::Back, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "spin",
        entrance: phase(
            &[curve!(Rotation, -360.0, 0.0), curve!(Scale, 0.0, 1.0)],
            1000,
            0,
            ease(Curve::Circ, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Rotation, 0.0, 360.0), curve!(Scale, 1.0, 0.0)],
            1000,
            0,
            ease(Curve::Circ, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "flip",
        entrance: phase(&[curve!(Scale, 0.0, 1.0)], 400, 400, ease(Curve::Power, EaseMode::Out)),
        exit: phase(&[curve!(Scale, 1.0, 0.0)], 400, 0, ease(Curve::Power, EaseMode::In)),
    },
    TransitionDescriptor {
        name: "blur",
        entrance: phase(
            &[curve!(Blur, 20.0, 0.0), curve!(Opacity, 0.0, 1.0)],
            900,
            0,
            ease(Curve::Smooth, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Blur, 0.0, 20.0), curve!(Opacity, 1.0, 0.0)],
            900,
            0,
            ease(Curve::Smooth, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "dissolve",
        entrance: phase(
            &[curve!(Opacity, 0.0, 1.0), curve!(Blur, 8.0, 0.0), curve!(Brightness, 1.4, 1.0)],
            1200,
            0,
            ease(Curve::Smooth, EaseMode::InOut),
        ),
        exit: phase(
            &[curve!(Opacity, 1.0, 0.0), curve!(Brightness, 1.0, 1.4)],
            1200,
            0,
            ease(Curve::Smooth, EaseMode::InOut),
        ),
    },
    TransitionDescriptor {
        name: "bounce",
        entrance: phase(&[curve!(OffsetY, -1.0, 0.0)], 1200, 0, ease(Curve::Bounce, EaseMode::Out)),
        exit: phase(FADE_OUT, 600, 0, ease(Curve::Smooth, EaseMode::Out)),
    },
    TransitionDescriptor {
        name: "elastic",
        entrance: phase(&[curve!(Scale, 0.3, 1.0)], 1400, 0, ease(Curve::Elastic, EaseMode::Out)),
        exit: phase(
            &[curve!(Scale, 1.0, 0.3), curve!(Opacity, 1.0, 0.0)],
            500,
            0,
            ease(Curve::Power, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "pop",
        entrance: phase(&[curve!(Scale, 0.0, 1.0)], 500, 0, ease(Curve::Back, EaseMode::Out)),
        exit: phase(&[curve!(Scale, 1.0, 0.0)], 400, 0, ease(Curve::Back, EaseMode::In)),
    },
    TransitionDescriptor {
        name: "drop",
        entrance: phase(
            &[curve!(OffsetY, -1.0, 0.0), curve!(Rotation, -8.0, 0.0)],
            900,
            0,
            ease(Curve::Back, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(OffsetY, 0.0, 1.0), curve!(Opacity, 1.0, 0.0)],
            700,
            0,
            ease(Curve::Power, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "rise",
        entrance: phase(
            &[curve!(OffsetY, 1.0, 0.0), curve!(Opacity, 0.0, 1.0)],
            900,
            0,
            ease(Curve::Circ, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(OffsetY, 0.0, -0.3), curve!(Opacity, 1.0, 0.0)],
            700,
            0,
            ease(Curve::Circ, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "door",
        entrance: phase(
            &[curve!(OffsetX, 0.5, 0.0), curve!(Opacity, 0.0, 1.0)],
            700,
            500,
            ease(Curve::Power, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(OffsetX, 0.0, -0.5), curve!(Scale, 1.0, 0.9), curve!(Opacity, 1.0, 0.0)],
            600,
            0,
            ease(Curve::Power, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "swing",
        entrance: phase(
            &[curve!(Rotation, 25.0, 0.0), curve!(OffsetX, -0.2, 0.0), curve!(Opacity, 0.0, 1.0)],
            900,
            200,
            ease(Curve::Elastic, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Rotation, 0.0, -25.0), curve!(Opacity, 1.0, 0.0)],
            500,
            0,
            ease(Curve::Smooth, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "spiral",
        entrance: phase(
            &[curve!(Rotation, 720.0, 0.0), curve!(Scale, 0.0, 1.0), curve!(Opacity, 0.0, 1.0)],
            1400,
            0,
            ease(Curve::Expo, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Rotation, 0.0, -720.0), curve!(Scale, 1.0, 0.0)],
            1000,
            0,
            ease(Curve::Expo, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "flash",
        entrance: phase(
            &[curve!(Brightness, 3.0, 1.0), curve!(Opacity, 0.0, 1.0)],
            500,
            0,
            ease(Curve::Expo, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Brightness, 1.0, 3.0), curve!(Opacity, 1.0, 0.0)],
            300,
            0,
            ease(Curve::Expo, EaseMode::In),
        ),
    },
    TransitionDescriptor {
        name: "ken-burns",
        entrance: phase(
            &[curve!(Scale, 1.2, 1.0), curve!(Opacity, 0.0, 1.0)],
            2000,
            0,
            ease(Curve::Smooth, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Scale, 1.0, 1.1), curve!(Opacity, 1.0, 0.0)],
            1500,
            0,
            ease(Curve::Smooth, EaseMode::InOut),
        ),
    },
    TransitionDescriptor {
        name: "push",
        entrance: phase(&[curve!(OffsetX, 1.0, 0.0)], 800, 100, ease(Curve::Circ, EaseMode::InOut)),
        exit: phase(&[curve!(OffsetX, 0.0, -1.0)], 800, 0, ease(Curve::Circ, EaseMode::InOut)),
    },
    TransitionDescriptor {
        name: "shrink",
        entrance: phase(
            &[curve!(Scale, 1.1, 1.0), curve!(Opacity, 0.0, 1.0)],
            600,
            400,
            ease(Curve::Smooth, EaseMode::Out),
        ),
        exit: phase(
            &[curve!(Scale, 1.0, 0.0), curve!(Opacity, 1.0, 0.0)],
            500,
            0,
            ease(Curve::Power, EaseMode::In),
        ),
    },
];
