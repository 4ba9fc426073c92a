//! Animated decorative backgrounds rendered behind arbitrary content
//!
//! A drawing surface is kept sized and positioned to match its container,
//! and a pluggable pattern is driven through a per-frame render loop to
//! paint onto it.
//!
//! Core modules:
//! - `sim`: Deterministic confetti simulation (point masses, papers, ribbons)
//! - `pattern`: The pattern contract, the frame-loop driver, and the two
//!   shipped patterns
//! - `surface`: Drawing-surface abstraction and the lifecycle manager
//! - `platform`: Browser glue (canvas, requestAnimationFrame, ResizeObserver)

pub mod palette;
pub mod pattern;
pub mod platform;
pub mod sim;
pub mod surface;

pub use palette::ColorPair;
pub use pattern::{
    Confetti, ConfettiOptions, FrameCallback, FrameScheduler, FrameToken, ManualScheduler,
    Pattern, PatternDriver, PatternFactory, ZoomCircle,
};
pub use sim::RibbonGeometry;
pub use surface::{ContentBox, SharedSurface, Surface, SurfaceManager};

/// Engine configuration defaults
pub mod consts {
    /// Frames per virtual second when no explicit timestep is configured
    pub const DEFAULT_SPEED: f32 = 50.0;
    /// Papers per engine, before device-pixel-ratio scaling
    pub const DEFAULT_PAPER_COUNT: usize = 50;
    /// Ribbons per engine
    pub const DEFAULT_RIBBON_COUNT: usize = 10;
}

#[cfg(test)]
pub(crate) mod test_support;
