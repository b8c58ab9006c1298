//! Transition registry: identifier → paired entrance/exit animation.
//!
//! Identifiers come from stored sequence records and drift over time, so
//! lookup is total: anything unrecognized resolves to `fade`.

mod catalog;
pub mod descriptor;
pub mod easing;

use rand::Rng;

pub use descriptor::{Phase, Property, PropertyCurve, TransitionDescriptor, VisualProps};
pub use easing::{Curve, EaseMode, Easing};

pub struct TransitionRegistry;

impl TransitionRegistry {
    /// Descriptor for `id`, or `fade` when it is missing or unknown.
    pub fn lookup<'a>(id: impl Into<Option<&'a str>>) -> &'static TransitionDescriptor {
        id.into().and_then(Self::get).unwrap_or(Self::fade())
    }

    /// Exact lookup after normalizing the identifier.
    pub fn get(id: &str) -> Option<&'static TransitionDescriptor> {
        let key = normalize(id);
        catalog::CATALOG.iter().find(|descriptor| descriptor.name == key)
    }

    pub fn fade() -> &'static TransitionDescriptor {
        &catalog::FADE
    }

    pub fn all() -> &'static [TransitionDescriptor] {
        catalog::CATALOG
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        catalog::CATALOG.iter().map(|descriptor| descriptor.name)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> &'static TransitionDescriptor {
        &catalog::CATALOG[rng.random_range(0..catalog::CATALOG.len())]
    }
}

/// `" Slide_Left "` and `"slide left"` both name `slide-left`.
fn normalize(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
