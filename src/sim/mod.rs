//! Deterministic confetti simulation
//!
//! All entity state and math lives here. The simulation advances by a fixed
//! virtual timestep and every random draw comes through an injected
//! `rand::Rng`, so a seeded `Pcg32` reproduces identical runs. Entities
//! receive the container bounds by parameter; they hold no reference back to
//! the engine that owns them.

pub mod paper;
pub mod point_mass;
pub mod ribbon;

pub use paper::ConfettiPaper;
pub use point_mass::PointMass;
pub use ribbon::{ConfettiRibbon, RibbonGeometry};

use rand::Rng;

/// Uniform draw over `[0, max)`, tolerating a zero or negative span (an
/// unmeasured surface has zero bounds)
pub(crate) fn random_span(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}
