//! The pattern contract and the frame loop that drives it
//!
//! A pattern draws exactly one frame per `render` call, advancing its own
//! state synchronously. Scheduling is not the pattern's job: `PatternDriver`
//! owns the Stopped/Running loop and chains renders through the host's
//! frame scheduler.

pub mod confetti;
pub mod driver;
pub mod scheduler;
pub mod zoom_circle;

pub use confetti::{Confetti, ConfettiOptions};
pub use driver::PatternDriver;
pub use scheduler::{FrameCallback, FrameScheduler, FrameToken, ManualScheduler};
pub use zoom_circle::ZoomCircle;

use crate::surface::SharedSurface;

/// One animation unit: draw a single frame, advancing internal time and
/// state synchronously
pub trait Pattern {
    fn render(&mut self);
}

/// Builds a fresh pattern for a surface. Options are captured by the closure
/// at registration time; registering a new factory (for example with changed
/// options) forces the manager to rebuild.
pub type PatternFactory = Box<dyn Fn(SharedSurface) -> Box<dyn Pattern>>;
